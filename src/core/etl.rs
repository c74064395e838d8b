use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load once, stopping at the first error.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting fixture generation");

        tracing::info!("Extracting rows...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", rows.len());

        tracing::info!("Building submission...");
        let submission = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Built submission {} with {} questions and {} answers",
            submission.id,
            submission.questions.len(),
            submission.answers.len()
        );

        tracing::info!("Writing fixture...");
        let output_path = self.pipeline.load(submission).await?;
        tracing::info!("Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
