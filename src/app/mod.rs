//! Entry points handed to the host page.
//!
//! One `ImportApp` is built per page load and owns the pipeline; there is no
//! global registry behind it.

use crate::adapters::{HttpSubmitter, LocalBridge, StructureValidator};
use crate::core::detect::EnvironmentDetector;
use crate::core::pipeline::{ImportPipeline, PipelineOptions};
use crate::core::{ImportOutcome, ImportSettings, NativeBridge, Reporter, Submitter};
use crate::utils::error::Result;

pub struct ImportApp<B: NativeBridge, S: Submitter, R: Reporter> {
    pipeline: ImportPipeline<B, S, R>,
}

impl<B: NativeBridge, S: Submitter, R: Reporter> ImportApp<B, S, R> {
    pub fn new(pipeline: ImportPipeline<B, S, R>) -> Self {
        Self { pipeline }
    }

    pub fn is_native_context(&self) -> bool {
        self.pipeline.is_native_context()
    }

    /// Runs one import and returns once the outcome has been reported.
    pub async fn import_csv_file(&self) -> ImportOutcome {
        tracing::info!("🚀 Starting CSV import");
        self.pipeline.run().await
    }

    /// Older name for [`ImportApp::import_csv_file`].
    pub async fn pick_and_import_csv(&self) -> ImportOutcome {
        self.import_csv_file().await
    }
}

impl<R: Reporter> ImportApp<LocalBridge, HttpSubmitter, R> {
    /// Wires the filesystem bridge and the HTTP backend from settings.
    pub fn from_settings<C: ImportSettings + ?Sized>(
        settings: &C,
        file: Option<&str>,
        reporter: R,
    ) -> Result<Self> {
        let validator = StructureValidator::new(settings.required_headers().to_vec());
        let mut bridge = LocalBridge::new(validator);
        if let Some(file) = file {
            bridge = bridge.with_file(file);
        }

        let submitter = HttpSubmitter::from_settings(settings)?;
        tracing::debug!("Import endpoint: {}", submitter.endpoint());

        let pipeline = ImportPipeline::new(
            bridge,
            submitter,
            reporter,
            EnvironmentDetector::new(settings.user_agent()),
            PipelineOptions::from_settings(settings),
        );
        Ok(Self::new(pipeline))
    }
}
