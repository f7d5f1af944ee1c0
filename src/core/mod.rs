pub mod detect;
pub mod parser;
pub mod pipeline;

pub use crate::domain::model::{Entry, ImportOutcome, RawContent, Row, ValidationVerdict};
pub use crate::domain::ports::{ImportSettings, NativeBridge, Reporter, Submitter};
pub use crate::utils::error::Result;
