use crate::adapters::structure::StructureValidator;
use crate::domain::model::{RawContent, ValidationVerdict};
use crate::domain::ports::NativeBridge;
use crate::utils::error::{ImportError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Native bridge backed by the local filesystem.
///
/// The picker is either a path chosen up front (`--file`) or a prompt on the
/// terminal, where an empty answer cancels like closing a file dialog.
#[derive(Debug, Clone, Default)]
pub struct LocalBridge {
    preselected: Option<PathBuf>,
    validator: StructureValidator,
}

impl LocalBridge {
    pub fn new(validator: StructureValidator) -> Self {
        Self {
            preselected: None,
            validator,
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.preselected = Some(path.into());
        self
    }

    async fn prompt_for_path(&self) -> Result<Option<String>> {
        let mut stderr = tokio::io::stderr();
        stderr
            .write_all(b"CSV file to import (leave empty to cancel): ")
            .await?;
        stderr.flush().await?;

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        let answer = line.trim();
        if read == 0 || answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(answer.to_string()))
    }
}

#[async_trait]
impl NativeBridge for LocalBridge {
    async fn pick_csv_file(&self) -> Result<Option<String>> {
        match &self.preselected {
            Some(path) => Ok(Some(path.display().to_string())),
            None => self.prompt_for_path().await,
        }
    }

    async fn read_text(&self, path: &str, max_bytes: u64) -> Result<RawContent> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => return Err(ImportError::read("Not a file")),
        };
        if metadata.len() > max_bytes {
            tracing::debug!(
                "{} is {} bytes, limit is {}",
                path,
                metadata.len(),
                max_bytes
            );
            return Err(ImportError::read("File too large"));
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ImportError::read(e.to_string()))?;
        Ok(RawContent::new(content))
    }

    async fn validate_csv(&self, content: &RawContent) -> Result<ValidationVerdict> {
        Ok(self.validator.check(content.as_str()))
    }
}
