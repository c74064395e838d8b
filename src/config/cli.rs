use crate::config::{DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_SOURCE_URL};
use crate::domain::model::SubmissionHeader;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "qa-fixture")]
#[command(about = "Builds the labeling sample fixture from a question/answer HTML table")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Keep only the first N table rows (all rows when omitted)
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// TOML configuration file; replaces the source/output flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            max_rows: None,
            config: None,
            verbose: false,
            json_logs: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn source_url(&self) -> &str {
        &self.source_url
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn max_rows(&self) -> Option<usize> {
        self.max_rows
    }

    fn submission_header(&self) -> SubmissionHeader {
        SubmissionHeader::default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("--source-url", &self.source_url)?;
        validation::validate_path("--output-dir", &self.output_dir)?;
        validation::validate_file_name("--output-file", &self.output_file)?;
        if let Some(max_rows) = self.max_rows {
            validation::validate_positive_number("--max-rows", max_rows, 1)?;
        }
        Ok(())
    }
}
