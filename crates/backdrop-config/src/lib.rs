//! Configuration file handling for the backdrop viewer.
//!
//! The config lives in `config.toml` under the platform config directory.
//! Every field has a default, so a missing file or a partial file are both
//! valid.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use backdrop_core::{LifeConfig, StarfieldConfig};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the config inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
}

/// Which backdrop engine is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Life,
    Starfield,
}

impl EngineKind {
    /// Cycle to the other engine.
    pub fn next(self) -> Self {
        match self {
            EngineKind::Life => EngineKind::Starfield,
            EngineKind::Starfield => EngineKind::Life,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Life => "life",
            EngineKind::Starfield => "starfield",
        }
    }
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine shown at startup.
    pub engine: EngineKind,
    /// Minimum milliseconds between redrawn frames.
    pub frame_interval_ms: u64,
    /// Seed for reproducible animations. Omitted means OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Whether the starfield's activity signal starts on.
    pub start_active: bool,
    /// Backdrop background color as `#rrggbb` or `hsl(h, s%, l%)`.
    pub background: String,
    pub life: LifeConfig,
    pub starfield: StarfieldConfig,
}

impl Default for Config {
    fn default() -> Self {
        // Terminal pixels are large, so cells, counts and sizes are scaled
        // down from the engine defaults.
        Self {
            engine: EngineKind::default(),
            frame_interval_ms: 33,
            seed: None,
            start_active: true,
            background: "#0b0d17".to_string(),
            life: LifeConfig {
                cell_size: 4,
                fill_opacity: 0.35,
                grid_opacity: 0.06,
                ..LifeConfig::default()
            },
            starfield: StarfieldConfig {
                star_count: 220,
                scale: 0.25,
                shooting_star_chance: 0.004,
                planet_chance: 0.003,
                ..StarfieldConfig::default()
            },
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "backdrop")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.validated())
    }

    /// Load the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!("loading config from {}", path.display());
                Self::from_toml_str(&text, path)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(io_error)
    }

    /// Clamp engine settings and pacing into usable ranges.
    pub fn validated(self) -> Self {
        Self {
            frame_interval_ms: self.frame_interval_ms.max(1),
            life: self.life.validated(),
            starfield: self.starfield.validated(),
            ..self
        }
    }
}
