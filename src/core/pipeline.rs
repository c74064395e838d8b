use crate::core::{ConfigProvider, Pipeline, RowSource, SourceRow, Storage, Submission};
use crate::domain::model::build_submission;
use crate::utils::error::Result;
use std::path::Path;

/// Serializes a submission in fixture form: a compact one-element JSON array.
pub fn encode_fixture(submission: &Submission) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(std::slice::from_ref(submission))?)
}

/// Parses fixture bytes back into submissions. Counterpart of
/// [`encode_fixture`], used to read a written fixture back.
pub fn decode_fixture(data: &[u8]) -> Result<Vec<Submission>> {
    Ok(serde_json::from_slice(data)?)
}

/// fetch → extract table → build submission → write fixture.
pub struct FixturePipeline<R: RowSource, S: Storage, C: ConfigProvider> {
    pub(crate) source: R,
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<R: RowSource, S: Storage, C: ConfigProvider> FixturePipeline<R, S, C> {
    pub fn new(source: R, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }

    fn output_path(&self) -> String {
        Path::new(self.config.output_dir())
            .join(self.config.output_file())
            .display()
            .to_string()
    }

    /// Reads the fixture this pipeline writes back from storage.
    pub async fn read_back(&self) -> Result<Vec<Submission>> {
        let data = self.storage.read_file(self.config.output_file()).await?;
        decode_fixture(&data)
    }
}

#[async_trait::async_trait]
impl<R: RowSource, S: Storage, C: ConfigProvider> Pipeline for FixturePipeline<R, S, C> {
    async fn extract(&self) -> Result<Vec<SourceRow>> {
        self.source.fetch_rows().await
    }

    async fn transform(&self, rows: Vec<SourceRow>) -> Result<Submission> {
        Ok(build_submission(self.config.submission_header(), rows))
    }

    async fn load(&self, submission: Submission) -> Result<String> {
        let data = encode_fixture(&submission)?;

        tracing::debug!(
            "Writing fixture ({} bytes) to {}",
            data.len(),
            self.config.output_file()
        );
        self.storage
            .write_file(self.config.output_file(), &data)
            .await?;

        Ok(self.output_path())
    }
}
