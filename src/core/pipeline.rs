use crate::core::detect::EnvironmentDetector;
use crate::core::parser::{normalize, parse_rows};
use crate::domain::model::ImportOutcome;
use crate::domain::ports::{ImportSettings, NativeBridge, Reporter, Submitter};
use crate::utils::error::{ImportError, Result};

/// Bound used by the desktop shell when reading picked files.
pub const DEFAULT_MAX_BYTES: u64 = 2_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineState {
    Idle,
    Detecting,
    Acquiring,
    Validating,
    Parsing,
    Submitting,
    Reported,
}

/// Which optional phases a run goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub max_bytes: u64,
    pub validate: bool,
    pub submit: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            validate: true,
            submit: true,
        }
    }
}

impl PipelineOptions {
    pub fn from_settings<C: ImportSettings + ?Sized>(settings: &C) -> Self {
        Self {
            max_bytes: settings.max_bytes(),
            validate: settings.validate_enabled(),
            submit: settings.submit_enabled(),
        }
    }

    /// Validate only, parsing and submission left to a later phase.
    pub fn validate_only() -> Self {
        Self {
            submit: false,
            ..Self::default()
        }
    }

    /// Parse and submit without asking the structural validator.
    pub fn submit_only() -> Self {
        Self {
            validate: false,
            ..Self::default()
        }
    }
}

/// Result of a run plus the states it went through, in order.
#[derive(Debug)]
pub struct PipelineRun {
    pub outcome: ImportOutcome,
    pub states: Vec<PipelineState>,
}

struct StateTrail {
    states: Vec<PipelineState>,
}

impl StateTrail {
    fn new() -> Self {
        Self {
            states: vec![PipelineState::Idle],
        }
    }

    fn enter(&mut self, next: PipelineState) {
        let current = self.current();
        debug_assert!(next > current, "state {:?} revisited after {:?}", next, current);
        tracing::debug!("Pipeline state {:?} -> {:?}", current, next);
        self.states.push(next);
    }

    fn current(&self) -> PipelineState {
        self.states.last().copied().unwrap_or(PipelineState::Idle)
    }
}

/// One-shot CSV import: detect, acquire, validate, parse, submit, report.
///
/// Any failure or cancellation jumps straight to `Reported`; nothing after the
/// failing stage runs.
pub struct ImportPipeline<B: NativeBridge, S: Submitter, R: Reporter> {
    bridge: B,
    submitter: S,
    reporter: R,
    detector: EnvironmentDetector,
    options: PipelineOptions,
}

impl<B: NativeBridge, S: Submitter, R: Reporter> ImportPipeline<B, S, R> {
    pub fn new(
        bridge: B,
        submitter: S,
        reporter: R,
        detector: EnvironmentDetector,
        options: PipelineOptions,
    ) -> Self {
        Self {
            bridge,
            submitter,
            reporter,
            detector,
            options,
        }
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    pub fn is_native_context(&self) -> bool {
        self.detector.detect(self.bridge.presence())
    }

    pub async fn run(&self) -> ImportOutcome {
        self.run_traced().await.outcome
    }

    pub async fn run_traced(&self) -> PipelineRun {
        let mut trail = StateTrail::new();

        let outcome = match self.execute(&mut trail).await {
            Ok(outcome) => outcome,
            Err(ImportError::ValidationRejected { message }) => {
                ImportOutcome::RejectedInvalid(message)
            }
            Err(e) => {
                tracing::error!(
                    "❌ Import failed during {:?}: {} (Category: {:?}, Severity: {:?})",
                    trail.current(),
                    e,
                    e.category(),
                    e.severity()
                );
                ImportOutcome::Failed(e)
            }
        };

        trail.enter(PipelineState::Reported);
        self.reporter.report(&outcome);

        PipelineRun {
            outcome,
            states: trail.states,
        }
    }

    async fn execute(&self, trail: &mut StateTrail) -> Result<ImportOutcome> {
        trail.enter(PipelineState::Detecting);
        if !self.is_native_context() {
            return Err(ImportError::EnvironmentUnavailable);
        }

        trail.enter(PipelineState::Acquiring);
        let Some(path) = self.bridge.pick_csv_file().await? else {
            tracing::debug!("File selection cancelled");
            return Ok(ImportOutcome::Cancelled);
        };
        tracing::info!("📁 Reading {}", path);
        let content = self.bridge.read_text(&path, self.options.max_bytes).await?;
        tracing::debug!("Read {} bytes from {}", content.len(), path);

        let mut validation_message = None;
        if self.options.validate {
            trail.enter(PipelineState::Validating);
            let verdict = self.bridge.validate_csv(&content).await?;
            if !verdict.is_valid {
                tracing::warn!("CSV validation failed: {}", verdict.message);
                return Err(ImportError::ValidationRejected {
                    message: verdict.message,
                });
            }
            tracing::info!("✅ CSV validation successful: {}", verdict.message);
            validation_message = Some(verdict.message);
        }

        if !self.options.submit {
            // 只做驗證：解析與匯入留給之後的階段
            let message = validation_message.unwrap_or_else(|| {
                format!(
                    "read {} bytes, validation and submission disabled",
                    content.len()
                )
            });
            return Ok(ImportOutcome::Succeeded(message));
        }

        trail.enter(PipelineState::Parsing);
        let rows = parse_rows(content.as_str());
        drop(content);
        let entries = normalize(&rows);
        tracing::debug!("Parsed {} rows into {} entries", rows.len(), entries.len());

        trail.enter(PipelineState::Submitting);
        self.submitter.submit(&entries).await?;
        tracing::info!("📤 Submitted {} entries", entries.len());

        Ok(ImportOutcome::Succeeded(format!(
            "imported {} entries",
            entries.len()
        )))
    }
}
