use filament_core::GraphError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which guidance document a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Eep,
    Sop,
    SopStep,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Eep => "EEP definition",
            RecordKind::Sop => "SOP definition",
            RecordKind::SopStep => "SOP step",
        })
    }
}

#[derive(Error, Debug)]
pub enum EventError {
    #[error("{kind} not found: {id}")]
    MissingInput { kind: RecordKind, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] GraphError),

    #[error("{0}")]
    OutOfOrder(&'static str),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, EventError>;
