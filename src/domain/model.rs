use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier taken from the `QuestionId` column.
///
/// Emitted as a JSON number when the whole column is integral, otherwise as a
/// string. `Number` is listed first so untagged deserialization prefers it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{}", n),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        QuestionId::Text(value.to_string())
    }
}

impl From<i64> for QuestionId {
    fn from(value: i64) -> Self {
        QuestionId::Number(value)
    }
}

/// One data row of the source table, in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub question_id: QuestionId,
    pub question_text: String,
    pub answer_text: String,
}

impl SourceRow {
    pub fn new(
        question_id: impl Into<QuestionId>,
        question_text: impl Into<String>,
        answer_text: impl Into<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            question_text: question_text.into(),
            answer_text: answer_text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoiceWithReasoning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionData {
    pub id: QuestionId,
    pub question_type: QuestionType,
    pub question_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionEntry {
    pub rev: u32,
    pub data: QuestionData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub choice: String,
    pub reasoning: String,
}

/// Static identifiers stamped on every generated submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionHeader {
    pub id: String,
    pub queue_id: String,
    pub labeling_task_id: String,
    pub created_at: i64,
}

impl Default for SubmissionHeader {
    fn default() -> Self {
        Self {
            id: "sub_1".to_string(),
            queue_id: "queue_1".to_string(),
            labeling_task_id: "task_1".to_string(),
            created_at: 1_690_000_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub queue_id: String,
    pub labeling_task_id: String,
    pub created_at: i64,
    pub questions: Vec<QuestionEntry>,
    /// Keyed by the textual form of the question id; a later row with the
    /// same id replaces the earlier answer.
    pub answers: BTreeMap<String, AnswerEntry>,
}

impl Submission {
    pub fn empty(header: SubmissionHeader) -> Self {
        Self {
            id: header.id,
            queue_id: header.queue_id,
            labeling_task_id: header.labeling_task_id,
            created_at: header.created_at,
            questions: Vec::new(),
            answers: BTreeMap::new(),
        }
    }

    /// Folds one row into the accumulator and hands it back.
    pub fn with_row(mut self, row: SourceRow) -> Self {
        self.answers.insert(
            row.question_id.to_string(),
            AnswerEntry {
                choice: row.answer_text.clone(),
                reasoning: row.answer_text,
            },
        );
        self.questions.push(QuestionEntry {
            rev: 1,
            data: QuestionData {
                id: row.question_id,
                question_type: QuestionType::SingleChoiceWithReasoning,
                question_text: row.question_text,
            },
        });
        self
    }
}

pub fn build_submission<I>(header: SubmissionHeader, rows: I) -> Submission
where
    I: IntoIterator<Item = SourceRow>,
{
    rows.into_iter()
        .fold(Submission::empty(header), Submission::with_row)
}
