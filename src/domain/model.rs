use crate::utils::error::ImportError;
use serde::{Deserialize, Serialize};

/// Text read from a single picked file. Owned by one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent(String);

impl RawContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One line of the file split into trimmed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row(pub Vec<String>);

impl Row {
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// True when no cell carries any text.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|cell| cell.is_empty())
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: String,
    pub metric: String,
    pub value: f64,
    pub unit: Option<String>,
}

/// Body of `POST /api/import`.
#[derive(Debug, Serialize)]
pub struct ImportRequest<'a> {
    pub entries: &'a [Entry],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationVerdict {
    pub fn valid(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

/// Exactly one of these is produced per pipeline run.
#[derive(Debug)]
pub enum ImportOutcome {
    Cancelled,
    Succeeded(String),
    RejectedInvalid(String),
    Failed(ImportError),
}

impl ImportOutcome {
    /// Text shown to the user, `None` for a cancelled pick.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ImportOutcome::Cancelled => None,
            ImportOutcome::Succeeded(message) => Some(format!("SUCCESS: {}", message)),
            ImportOutcome::RejectedInvalid(message) => {
                Some(format!("ERROR: Invalid CSV - {}", message))
            }
            ImportOutcome::Failed(ImportError::EnvironmentUnavailable) => {
                Some(ImportError::EnvironmentUnavailable.user_friendly_message())
            }
            ImportOutcome::Failed(error) => Some(format!("Import failed: {}", error)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Succeeded(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImportOutcome::Cancelled => "cancelled",
            ImportOutcome::Succeeded(_) => "succeeded",
            ImportOutcome::RejectedInvalid(_) => "rejected",
            ImportOutcome::Failed(_) => "failed",
        }
    }
}
