#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

/// Page the fixture is generated from unless configured otherwise.
pub const DEFAULT_SOURCE_URL: &str = "https://nlp.cs.washington.edu/triviaqa/sample.html";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "sample_input_large.json";

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;
