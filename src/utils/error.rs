use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Malformed input: {message}")]
    MalformedInputError { message: String },

    #[error("Failed to write fixture to {path}: {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    MalformedInput,
    FileWrite,
    Configuration,
    Internal,
}

impl FixtureError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInputError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NetworkError(_) | Self::HttpStatusError { .. } => ErrorCategory::Network,
            Self::MalformedInputError { .. } => ErrorCategory::MalformedInput,
            Self::FileWriteError { .. } => ErrorCategory::FileWrite,
            Self::IoError(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::SerializationError(_) | Self::ProcessingError { .. } => ErrorCategory::Internal,
        }
    }

    /// Process exit code for the binary; every failure is non-zero.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Internal => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::MalformedInput => 3,
            ErrorCategory::FileWrite => 4,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check network connectivity and that the source URL is reachable"
            }
            ErrorCategory::MalformedInput => {
                "Make sure the page contains a table with QuestionId, Question and Answer columns"
            }
            ErrorCategory::FileWrite => {
                "Check that the output directory exists and is writable"
            }
            ErrorCategory::Configuration => "Review the command line flags and the TOML config file",
            ErrorCategory::Internal => "Re-run with --verbose and report the log output",
        }
    }
}

pub type Result<T> = std::result::Result<T, FixtureError>;
