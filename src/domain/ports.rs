use crate::domain::model::{SourceRow, Submission, SubmissionHeader};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Byte store the fixture is written to and read back from.
pub trait Storage: Send + Sync {
    /// Reads a whole file, as used by `FixturePipeline::read_back`.
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn output_file(&self) -> &str;
    fn max_rows(&self) -> Option<usize>;
    fn submission_header(&self) -> SubmissionHeader;
}

/// Where the question/answer rows come from.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<SourceRow>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceRow>>;
    async fn transform(&self, rows: Vec<SourceRow>) -> Result<Submission>;
    async fn load(&self, submission: Submission) -> Result<String>;
}
