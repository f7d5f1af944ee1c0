pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{ConsoleReporter, HttpSubmitter, LocalBridge, StructureValidator};
pub use crate::app::ImportApp;
pub use crate::core::detect::{is_native_context, EnvironmentDetector};
pub use crate::core::parser::{normalize, parse_rows};
pub use crate::core::pipeline::{ImportPipeline, PipelineOptions, PipelineState};
pub use crate::domain::model::{Entry, ImportOutcome, RawContent, Row, ValidationVerdict};
pub use crate::utils::error::{ImportError, Result};
