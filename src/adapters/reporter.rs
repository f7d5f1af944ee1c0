use crate::domain::model::ImportOutcome;
use crate::domain::ports::Reporter;

/// Prints the user-facing line and writes one log entry per outcome.
///
/// Successes go to stdout, problems to stderr. A cancelled pick prints
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, outcome: &ImportOutcome) {
        match outcome {
            ImportOutcome::Cancelled => {
                tracing::debug!("Import cancelled by user");
            }
            ImportOutcome::Succeeded(message) => {
                tracing::info!("✅ Import succeeded: {}", message);
            }
            ImportOutcome::RejectedInvalid(message) => {
                tracing::warn!("CSV validation failed: {}", message);
            }
            ImportOutcome::Failed(error) => {
                tracing::error!("❌ Import failed: {:?}", error);
                tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());
            }
        }

        if let Some(message) = outcome.user_message() {
            if outcome.is_success() {
                println!("{}", message);
            } else {
                eprintln!("{}", message);
            }
        }
    }
}
