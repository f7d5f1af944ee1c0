// Adapters layer: concrete implementations of the domain ports.

pub mod bridge;
pub mod http;
pub mod reporter;
pub mod structure;

pub use bridge::LocalBridge;
pub use http::HttpSubmitter;
pub use reporter::ConsoleReporter;
pub use structure::StructureValidator;
