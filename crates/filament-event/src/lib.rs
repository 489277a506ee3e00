//! Filament Event: one stateless query, guidance, analysis, output cycle

pub mod config;
pub mod error;
pub mod event;
pub mod projection;
pub mod query;
pub mod report;


#[cfg(test)]
pub mod test_utils;

pub use config::FilamentConfig;
pub use error::{ConfigError, EventError, RecordKind};
pub use event::{AnalysisOutcome, AnalysisStatus, FilamentEvent, Guidance, run_event};
pub use projection::{DetectedSignatures, OutputProjection};
pub use query::{Query, QueryConfig};
