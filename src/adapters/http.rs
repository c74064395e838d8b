use crate::adapters::html::extract_table;
use crate::domain::model::SourceRow;
use crate::domain::ports::{ConfigProvider, RowSource};
use crate::utils::error::{FixtureError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Reads rows from the first table of a remote HTML page.
///
/// One GET per call, default client settings (no retries, no timeout
/// override).
#[derive(Debug, Clone)]
pub struct HttpTableSource {
    client: Client,
    url: String,
    max_rows: Option<usize>,
}

impl HttpTableSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            max_rows: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.source_url()).with_max_rows(config.max_rows())
    }

    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_html(&self) -> Result<String> {
        tracing::debug!("Making HTTP request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("HTTP response status: {}", status);

        if !status.is_success() {
            return Err(FixtureError::HttpStatusError {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl RowSource for HttpTableSource {
    async fn fetch_rows(&self) -> Result<Vec<SourceRow>> {
        let html = self.fetch_html().await?;
        tracing::debug!("Fetched {} bytes of HTML", html.len());

        let mut rows = extract_table(&html)?;
        if let Some(limit) = self.max_rows {
            if rows.len() > limit {
                tracing::info!("Limiting {} table rows to the first {}", rows.len(), limit);
                rows.truncate(limit);
            }
        }

        Ok(rows)
    }
}
