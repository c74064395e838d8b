use crate::config::{DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_SOURCE_URL};
use crate::domain::model::SubmissionHeader;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FixtureError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based configuration. Every section is optional; anything left out
/// falls back to the same defaults as the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub load: LoadConfig,
    pub submission: SubmissionHeader,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub max_rows: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_dir: String,
    pub output_file: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FixtureError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FixtureError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.url", &self.source.url)?;
        validation::validate_path("load.output_dir", &self.load.output_dir)?;
        validation::validate_file_name("load.output_file", &self.load.output_file)?;

        if let Some(max_rows) = self.extract.max_rows {
            validation::validate_positive_number("extract.max_rows", max_rows, 1)?;
        }

        validation::validate_non_empty_string("submission.id", &self.submission.id)?;
        validation::validate_non_empty_string("submission.queue_id", &self.submission.queue_id)?;
        validation::validate_non_empty_string(
            "submission.labeling_task_id",
            &self.submission.labeling_task_id,
        )?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn source_url(&self) -> &str {
        &self.source.url
    }

    fn output_dir(&self) -> &str {
        &self.load.output_dir
    }

    fn output_file(&self) -> &str {
        &self.load.output_file
    }

    fn max_rows(&self) -> Option<usize> {
        self.extract.max_rows
    }

    fn submission_header(&self) -> SubmissionHeader {
        self.submission.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
