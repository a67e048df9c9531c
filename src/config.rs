//! Configuration for Carnet
//!
//! Read from `config.toml` in the data directory. Every field is optional:
//! ```toml
//! vocab_file = "vocab.csv"
//! session_file = "session.json"
//! glossary_file = "/path/to/glossary.csv"
//!
//! [review]
//! daily_cap = 50
//! growth_factor = 2.2
//! seed_daily_sample = true
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::review::algorithm::{DAILY_CAP, GROWTH_FACTOR};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Scheduling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ReviewConfig {
    /// Most entries drawn into one day's session
    pub daily_cap: usize,
    /// Interval multiplier after a remembered review
    pub growth_factor: f64,
    /// Draw the daily sample from a seed derived from the date, so restarts
    /// on the same day pick the same entries
    pub seed_daily_sample: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            daily_cap: DAILY_CAP,
            growth_factor: GROWTH_FACTOR,
            seed_daily_sample: true,
        }
    }
}

impl ReviewConfig {
    pub fn validate(&self) -> Result<()> {
        if self.daily_cap == 0 {
            return Err(ConfigError::Invalid {
                field: "review.daily_cap",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.growth_factor.is_finite() || self.growth_factor < 1.0 {
            return Err(ConfigError::Invalid {
                field: "review.growth_factor",
                reason: format!("must be a finite number >= 1, got {}", self.growth_factor),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    /// Vocabulary CSV, relative to the data directory unless absolute
    pub vocab_file: PathBuf,
    /// Stored review session, relative to the data directory unless absolute
    pub session_file: PathBuf,
    /// Offline dictionary CSV used by lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glossary_file: Option<PathBuf>,
    pub review: ReviewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocab_file: PathBuf::from("vocab.csv"),
            session_file: PathBuf::from("session.json"),
            glossary_file: None,
            review: ReviewConfig::default(),
        }
    }
}

impl Config {
    /// Default data directory (e.g. ~/.local/share/carnet)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("carnet"))
            .ok_or(ConfigError::DataDirNotFound)
    }

    /// Load `config.toml` from `data_dir`, falling back to defaults when absent
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let config = match fs::read_to_string(&path) {
            Ok(content) => {
                log::debug!("Reading config from {:?}", path);
                toml::from_str::<Config>(&content)?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(e.into()),
        };

        config.review.validate()?;
        Ok(config)
    }

    pub fn vocab_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.vocab_file)
    }

    pub fn session_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.session_file)
    }

    pub fn glossary_path(&self, data_dir: &Path) -> Option<PathBuf> {
        self.glossary_file.as_ref().map(|p| data_dir.join(p))
    }
}
