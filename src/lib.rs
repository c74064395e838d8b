pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{html::extract_table, http::HttpTableSource, storage::LocalStorage};
pub use crate::core::{etl::EtlEngine, pipeline::FixturePipeline};
pub use crate::domain::model::{build_submission, SourceRow, Submission, SubmissionHeader};
pub use crate::utils::error::{FixtureError, Result};
