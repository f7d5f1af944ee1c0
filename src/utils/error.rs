use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("native features unavailable")]
    EnvironmentUnavailable,

    #[error("Read error: {message}")]
    ReadError { message: String },

    #[error("Invalid CSV: {message}")]
    ValidationRejected { message: String },

    #[error("Submission failed: {message}")]
    SubmissionError { status: Option<u16>, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Environment,
    Input,
    Validation,
    Network,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn read(message: impl Into<String>) -> Self {
        Self::ReadError {
            message: message.into(),
        }
    }

    pub fn submission(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::SubmissionError {
            status,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::EnvironmentUnavailable => ErrorCategory::Environment,
            ImportError::ReadError { .. } | ImportError::IoError(_) => ErrorCategory::Input,
            ImportError::ValidationRejected { .. } => ErrorCategory::Validation,
            ImportError::SubmissionError { .. } => ErrorCategory::Network,
            ImportError::ConfigError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Environment | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for showing to the person who started the import.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::EnvironmentUnavailable => {
                "App features unavailable in browser.".to_string()
            }
            ImportError::ReadError { message } => format!("Could not read the file: {}", message),
            ImportError::ValidationRejected { message } => format!("Invalid CSV - {}", message),
            ImportError::SubmissionError {
                status: Some(code), ..
            } => format!("The server rejected the import (HTTP {})", code),
            ImportError::SubmissionError { status: None, .. } => {
                "Could not reach the server".to_string()
            }
            ImportError::IoError(e) => format!("File system error: {}", e),
            ImportError::ConfigError { message } => format!("Configuration problem: {}", message),
            ImportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            ImportError::MissingConfigError { field } => {
                format!("Missing setting '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Environment => "Open the page inside the desktop app to import files",
            ErrorCategory::Input => "Check that the file exists, is UTF-8 text and is under the size limit",
            ErrorCategory::Validation => "Fix the CSV header and row layout, then import again",
            ErrorCategory::Network => "Check the connection and the backend URL, then try again",
            ErrorCategory::Configuration => "Review the command line flags or the TOML config file",
        }
    }
}
