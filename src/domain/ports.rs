use crate::domain::model::{Entry, ImportOutcome, RawContent, ValidationVerdict};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Capabilities the native shell exposes to embedded web content.
#[async_trait]
pub trait NativeBridge: Send + Sync {
    /// Whether the invoke surface is reachable. `None` means the bridge cannot
    /// tell, and detection falls back to the user agent marker.
    fn presence(&self) -> Option<bool> {
        None
    }

    /// `Ok(None)` when the user dismisses the picker.
    async fn pick_csv_file(&self) -> Result<Option<String>>;

    async fn read_text(&self, path: &str, max_bytes: u64) -> Result<RawContent>;

    async fn validate_csv(&self, content: &RawContent) -> Result<ValidationVerdict>;
}

#[async_trait]
pub trait Submitter: Send + Sync {
    /// All-or-nothing delivery of the normalized entries.
    async fn submit(&self, entries: &[Entry]) -> Result<()>;
}

pub trait Reporter: Send + Sync {
    fn report(&self, outcome: &ImportOutcome);
}

pub trait ImportSettings: Send + Sync {
    fn user_agent(&self) -> &str;
    fn max_bytes(&self) -> u64;
    fn required_headers(&self) -> &[String];
    fn base_url(&self) -> &str;
    fn csrf_token(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn validate_enabled(&self) -> bool;
    fn submit_enabled(&self) -> bool;
}
