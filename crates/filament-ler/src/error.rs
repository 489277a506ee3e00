use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LerError {
    #[error("LER root directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

pub type Result<T> = std::result::Result<T, LerError>;
