//! `filament.toml` loading with `.env` and environment overrides
//!
//! Layers, lowest first: built-in defaults, the config file, environment
//! variables. Command-line flags are applied on top by the binary.

use crate::error::ConfigError;
use crate::query::QueryConfig;
use filament_core::ClassifierConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "filament.toml";
pub const ENV_LER_ROOT: &str = "FILAMENT_LER_ROOT";
pub const ENV_SEED: &str = "FILAMENT_SEED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilamentConfig {
    /// Root of the LER document tree.
    pub ler_root: PathBuf,
    pub classifier: ClassifierConfig,
    pub query: QueryConfig,
}

impl Default for FilamentConfig {
    fn default() -> Self {
        FilamentConfig {
            ler_root: PathBuf::from(".."),
            classifier: ClassifierConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

impl FilamentConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given (it must exist), else `./filament.toml` if
    /// present, else defaults. `.env` is read first, then the environment
    /// overrides are applied.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", env_file.display());
        }

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply `FILAMENT_LER_ROOT` and `FILAMENT_SEED` as read through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = var(ENV_LER_ROOT).filter(|v| !v.is_empty()) {
            self.ler_root = PathBuf::from(root);
        }
        if let Some(seed) = var(ENV_SEED).filter(|v| !v.is_empty()) {
            let parsed = seed.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_SEED,
                value: seed.clone(),
            })?;
            self.classifier.seed = Some(parsed);
        }
        Ok(())
    }
}
