use crate::domain::model::{QuestionId, SourceRow};
use crate::utils::error::{FixtureError, Result};
use scraper::{ElementRef, Html, Selector};

pub const QUESTION_ID_COLUMN: &str = "QuestionId";
pub const QUESTION_COLUMN: &str = "Question";
pub const ANSWER_COLUMN: &str = "Answer";

// Upper bounds browsers apply to span attributes.
const MAX_COLSPAN: usize = 1000;
const MAX_ROWSPAN: usize = 65534;

#[derive(Debug, Clone)]
struct Cell {
    header: bool,
    text: String,
}

struct SpannedCell {
    cell: Cell,
    colspan: usize,
    rowspan: usize,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FixtureError::ProcessingError {
        message: format!("invalid selector '{}': {:?}", css, e),
    })
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of `el` without the text of any table nested inside it.
fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if child_el.value().name() != "table" {
                collect_text(child_el, out);
            }
        }
    }
}

fn span_attr(el: ElementRef<'_>, name: &str, max: usize) -> usize {
    el.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .map_or(1, |n| n.min(max))
}

/// Row groups of `table` in document order. Only the table's own rows are
/// returned: direct `tr` children and the `tr` children of its
/// `thead`/`tbody`/`tfoot`. Rows of nested tables are never included.
fn table_sections(table: ElementRef<'_>) -> Vec<Vec<ElementRef<'_>>> {
    let mut sections = Vec::new();
    let mut loose = Vec::new();

    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => loose.push(child),
            "thead" | "tbody" | "tfoot" => {
                if !loose.is_empty() {
                    sections.push(std::mem::take(&mut loose));
                }
                sections.push(
                    child
                        .children()
                        .filter_map(ElementRef::wrap)
                        .filter(|el| el.value().name() == "tr")
                        .collect(),
                );
            }
            _ => {}
        }
    }
    if !loose.is_empty() {
        sections.push(loose);
    }

    sections
}

/// Direct `th`/`td` children of a row with their span attributes.
fn row_cells(row: ElementRef<'_>) -> Vec<SpannedCell> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter_map(|el| {
            let header = match el.value().name() {
                "th" => true,
                "td" => false,
                _ => return None,
            };
            let mut text = String::new();
            collect_text(el, &mut text);
            Some(SpannedCell {
                cell: Cell {
                    header,
                    text: normalize_ws(&text),
                },
                colspan: span_attr(el, "colspan", MAX_COLSPAN),
                rowspan: span_attr(el, "rowspan", MAX_ROWSPAN),
            })
        })
        .collect()
}

/// Lays the rows of one section out on a grid. A `colspan` cell repeats its
/// text in every column it covers and a `rowspan` cell is carried into the
/// same columns of the rows below it.
fn expand_spans(rows: Vec<Vec<SpannedCell>>) -> Vec<Vec<Cell>> {
    // Per column: rows still to fill and the cell to fill them with.
    let mut carried: Vec<Option<(usize, Cell)>> = Vec::new();

    rows.into_iter()
        .map(|row| {
            let mut out: Vec<Cell> = Vec::new();
            let mut cells = row.into_iter();

            loop {
                let col = out.len();
                if let Some(slot) = carried.get_mut(col) {
                    if let Some((remaining, cell)) = slot.take() {
                        out.push(cell.clone());
                        if remaining > 1 {
                            *slot = Some((remaining - 1, cell));
                        }
                        continue;
                    }
                }

                let Some(spanned) = cells.next() else {
                    // Carried cells past the last own cell still fill the row.
                    if carried[col.min(carried.len())..].iter().any(Option::is_some) {
                        out.push(Cell {
                            header: false,
                            text: String::new(),
                        });
                        continue;
                    }
                    break;
                };

                for _ in 0..spanned.colspan {
                    let col = out.len();
                    if spanned.rowspan > 1 {
                        if carried.len() <= col {
                            carried.resize(col + 1, None);
                        }
                        carried[col] = Some((spanned.rowspan - 1, spanned.cell.clone()));
                    }
                    out.push(spanned.cell.clone());
                }
            }

            out
        })
        .collect()
}

fn cell_text(cells: &[Cell], idx: usize) -> String {
    cells.get(idx).map(|c| c.text.clone()).unwrap_or_default()
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Positions of the `QuestionId`, `Question` and `Answer` columns, or a
/// malformed-input error naming every one that is absent.
fn required_columns(headers: &[String]) -> Result<[usize; 3]> {
    let mut found = [0usize; 3];
    let mut missing = Vec::new();

    for (slot, name) in found
        .iter_mut()
        .zip([QUESTION_ID_COLUMN, QUESTION_COLUMN, ANSWER_COLUMN])
    {
        match column_index(headers, name) {
            Some(idx) => *slot = idx,
            None => missing.push(name),
        }
    }

    if !missing.is_empty() {
        return Err(FixtureError::malformed(format!(
            "missing required column(s) {} (found: {})",
            missing.join(", "),
            headers.join(", ")
        )));
    }
    Ok(found)
}

/// Extracts `QuestionId`, `Question` and `Answer` from the first `<table>` of
/// `html`, one [`SourceRow`] per data row in document order.
///
/// The header row is the first row holding a `th` cell; every later row with
/// at least one `td` is data. Rows and text of nested tables are ignored, and
/// `colspan`/`rowspan` are expanded before columns are looked up. Ids become
/// numbers only when every id in the column is an integer.
pub fn extract_table(html: &str) -> Result<Vec<SourceRow>> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| FixtureError::malformed("no <table> element found"))?;

    let rows: Vec<Vec<Cell>> = table_sections(table)
        .into_iter()
        .flat_map(|section| expand_spans(section.into_iter().map(row_cells).collect()))
        .collect();

    let header_pos = rows
        .iter()
        .position(|cells| cells.iter().any(|c| c.header))
        .ok_or_else(|| FixtureError::malformed("first table has no header row"))?;

    let headers: Vec<String> = rows[header_pos].iter().map(|c| c.text.clone()).collect();
    tracing::debug!("Table header columns: {:?}", headers);

    let [id_idx, question_idx, answer_idx] = required_columns(&headers)?;

    let data_rows: Vec<(String, String, String)> = rows[header_pos + 1..]
        .iter()
        .filter(|cells| cells.iter().any(|c| !c.header))
        .map(|cells| {
            (
                cell_text(cells, id_idx),
                cell_text(cells, question_idx),
                cell_text(cells, answer_idx),
            )
        })
        .collect();

    let numeric_ids: Option<Vec<i64>> = data_rows
        .iter()
        .map(|(id, _, _)| id.parse::<i64>().ok())
        .collect();

    let rows: Vec<SourceRow> = match numeric_ids {
        Some(ids) if !ids.is_empty() => data_rows
            .into_iter()
            .zip(ids)
            .map(|((_, question, answer), id)| SourceRow::new(id, question, answer))
            .collect(),
        _ => data_rows
            .into_iter()
            .map(|(id, question, answer)| SourceRow::new(QuestionId::Text(id), question, answer))
            .collect(),
    };

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;

    const SCENARIO_HTML: &str = r#"
<html><body>
<h1>Sample</h1>
<table border="1">
  <thead>
    <tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr>
  </thead>
  <tbody>
    <tr><td>q1</td><td>What is 2+2?</td><td>4</td></tr>
    <tr><td>q2</td><td>Capital of France?</td><td>Paris</td></tr>
  </tbody>
</table>
</body></html>
"#;

    #[test]
    fn test_extract_scenario_rows() {
        let rows = extract_table(SCENARIO_HTML).unwrap();

        assert_eq!(
            rows,
            vec![
                SourceRow::new("q1", "What is 2+2?", "4"),
                SourceRow::new("q2", "Capital of France?", "Paris"),
            ]
        );
    }

    #[test]
    fn test_extract_selects_columns_by_name_not_position() {
        let html = r#"<table>
            <tr><th>Answer</th><th>Source</th><th>Question</th><th>QuestionId</th></tr>
            <tr><td>Paris</td><td>wiki</td><td>Capital of France?</td><td>tc_1</td></tr>
        </table>"#;

        let rows = extract_table(html).unwrap();

        assert_eq!(rows, vec![SourceRow::new("tc_1", "Capital of France?", "Paris")]);
    }

    #[test]
    fn test_missing_answer_column_is_malformed() {
        let html = r#"<table>
            <tr><th>QuestionId</th><th>Question</th></tr>
            <tr><td>q1</td><td>What is 2+2?</td></tr>
        </table>"#;

        let err = extract_table(html).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::MalformedInput);
        assert!(err.to_string().contains("Answer"));
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let html = r#"<table>
            <tr><th>questionid</th><th>Question</th><th>Answer</th></tr>
            <tr><td>q1</td><td>What is 2+2?</td><td>4</td></tr>
        </table>"#;

        let err = extract_table(html).unwrap_err();
        assert!(matches!(err, FixtureError::MalformedInputError { .. }));
    }

    #[test]
    fn test_no_table_is_malformed() {
        let err = extract_table("<html><body><p>nothing here</p></body></html>").unwrap_err();

        assert!(matches!(err, FixtureError::MalformedInputError { .. }));
    }

    #[test]
    fn test_table_without_header_row_is_malformed() {
        let html = "<table><tr><td>q1</td><td>x</td><td>y</td></tr></table>";

        let err = extract_table(html).unwrap_err();
        assert!(err.to_string().contains("header"));
    }

    #[test]
    fn test_header_only_table_yields_no_rows() {
        let html = "<table><tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr></table>";

        let rows = extract_table(html).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_only_first_table_is_read() {
        let html = r#"
            <table><tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr>
                   <tr><td>a</td><td>first?</td><td>1</td></tr></table>
            <table><tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr>
                   <tr><td>b</td><td>second?</td><td>2</td></tr></table>"#;

        let rows = extract_table(html).unwrap();
        assert_eq!(rows, vec![SourceRow::new("a", "first?", "1")]);
    }

    #[test]
    fn test_integer_id_column_becomes_numeric() {
        let html = r#"<table>
            <tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr>
            <tr><td>10</td><td>Ten?</td><td>yes</td></tr>
            <tr><td> 11 </td><td>Eleven?</td><td>no</td></tr>
        </table>"#;

        let rows = extract_table(html).unwrap();

        assert_eq!(rows[0].question_id, QuestionId::Number(10));
        assert_eq!(rows[1].question_id, QuestionId::Number(11));
    }

    #[test]
    fn test_mixed_id_column_stays_textual() {
        let html = r#"<table>
            <tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr>
            <tr><td>10</td><td>Ten?</td><td>yes</td></tr>
            <tr><td>tc_11</td><td>Eleven?</td><td>no</td></tr>
        </table>"#;

        let rows = extract_table(html).unwrap();

        assert_eq!(rows[0].question_id, QuestionId::Text("10".to_string()));
        assert_eq!(rows[1].question_id, QuestionId::Text("tc_11".to_string()));
    }

    #[test]
    fn test_cell_text_is_whitespace_normalized() {
        let html = "<table>
            <tr><th> QuestionId </th><th>Question</th><th>Answer</th></tr>
            <tr><td>q1</td><td>Who   wrote\n  <b>Hamlet</b>?</td><td><a href=\"#\">Shake</a>speare</td></tr>
        </table>";

        let rows = extract_table(html).unwrap();

        assert_eq!(rows[0].question_text, "Who wrote Hamlet?");
        assert_eq!(rows[0].answer_text, "Shakespeare");
    }

    #[test]
    fn test_short_row_fills_missing_cells_with_empty_text() {
        let html = r#"<table>
            <tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr>
            <tr><td>q1</td><td>Unanswered?</td></tr>
        </table>"#;

        let rows = extract_table(html).unwrap();
        assert_eq!(rows, vec![SourceRow::new("q1", "Unanswered?", "")]);
    }

    #[test]
    fn test_nested_table_rows_are_not_data_rows() {
        let html = r#"<table>
            <tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr>
            <tr>
              <td>q1</td>
              <td>Q?<table><tr><td>inner_a</td><td>inner_b</td><td>inner_c</td></tr></table></td>
              <td>A</td>
            </tr>
        </table>"#;

        let rows = extract_table(html).unwrap();

        assert_eq!(rows, vec![SourceRow::new("q1", "Q?", "A")]);
    }

    #[test]
    fn test_nested_table_header_does_not_become_header_row() {
        let html = r#"<table>
            <tr><td>note<table><tr><th>Inner</th></tr></table></td></tr>
            <tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr>
            <tr><td>q1</td><td>What?</td><td>A</td></tr>
        </table>"#;

        let rows = extract_table(html).unwrap();

        assert_eq!(rows, vec![SourceRow::new("q1", "What?", "A")]);
    }

    #[test]
    fn test_colspan_header_shifts_columns() {
        let html = r#"<table>
            <tr><th colspan="2">QuestionId</th><th>Question</th><th>Answer</th></tr>
            <tr><td>x</td><td>q1</td><td>What?</td><td>A</td></tr>
        </table>"#;

        let rows = extract_table(html).unwrap();

        assert_eq!(rows, vec![SourceRow::new("x", "What?", "A")]);
    }

    #[test]
    fn test_colspan_data_cell_fills_each_covered_column() {
        let html = r#"<table>
            <tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr>
            <tr><td>q1</td><td colspan="2">Same</td></tr>
        </table>"#;

        let rows = extract_table(html).unwrap();

        assert_eq!(rows, vec![SourceRow::new("q1", "Same", "Same")]);
    }

    #[test]
    fn test_rowspan_cell_is_carried_into_following_rows() {
        let html = r#"<table>
            <thead><tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr></thead>
            <tbody>
              <tr><td>q1</td><td rowspan="2">Shared?</td><td>yes</td></tr>
              <tr><td>q2</td><td>no</td></tr>
              <tr><td>q3</td><td>Own?</td><td rowspan="3">maybe</td></tr>
              <tr><td>q4</td><td>Next?</td></tr>
            </tbody>
        </table>"#;

        let rows = extract_table(html).unwrap();

        assert_eq!(
            rows,
            vec![
                SourceRow::new("q1", "Shared?", "yes"),
                SourceRow::new("q2", "Shared?", "no"),
                SourceRow::new("q3", "Own?", "maybe"),
                SourceRow::new("q4", "Next?", "maybe"),
            ]
        );
    }

    #[test]
    fn test_invalid_span_values_count_as_one() {
        let html = r#"<table>
            <tr><th>QuestionId</th><th>Question</th><th>Answer</th></tr>
            <tr><td colspan="0">q1</td><td rowspan="abc">What?</td><td colspan="-2">A</td></tr>
            <tr><td>q2</td><td>Else?</td><td>B</td></tr>
        </table>"#;

        let rows = extract_table(html).unwrap();

        assert_eq!(
            rows,
            vec![
                SourceRow::new("q1", "What?", "A"),
                SourceRow::new("q2", "Else?", "B"),
            ]
        );
    }
}
