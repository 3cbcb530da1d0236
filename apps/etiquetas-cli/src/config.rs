//! # Application Configuration
//!
//! Where the label assets live and where the event logs are written.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority, paths only)               │
//! │     ETIQUETAS_DATA_DIR=/var/lib/etiquetas                              │
//! │     ETIQUETAS_FONT=/usr/share/fonts/Inter-Medium.ttf                   │
//! │     ETIQUETAS_WATERMARK=/srv/etiquetas/logo.jpg                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/etiquetas/etiquetas.toml (Linux)                         │
//! │     ~/Library/Application Support/ar.came.etiquetas/etiquetas.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Paths relative to the working directory                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # etiquetas.toml
//! data_dir = "data"
//! font_path = "Fuentes/Inter/Inter-Medium.ttf"
//! watermark_path = "imgs/CAME_baja-solo.jpg"
//! retry_delay_ms = 2000
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Longest accepted pause before the event log retry.
pub const MAX_RETRY_DELAY_MS: u64 = 60_000;

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is present but unusable.
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// App Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `calificaciones.csv` and `provincias.csv`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// TrueType font used for all label text.
    #[serde(default = "default_font_path")]
    pub font_path: PathBuf,

    /// Image faded into the label background.
    #[serde(default = "default_watermark_path")]
    pub watermark_path: PathBuf,

    /// Pause before retrying a failed log write (milliseconds).
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_font_path() -> PathBuf {
    PathBuf::from("Fuentes/Inter/Inter-Medium.ttf")
}

fn default_watermark_path() -> PathBuf {
    PathBuf::from("imgs/CAME_baja-solo.jpg")
}

fn default_retry_delay() -> u64 {
    2000
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            font_path: default_font_path(),
            watermark_path: default_watermark_path(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`--config`, else the platform config directory)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(ConfigError::InvalidValue(format!(
                    "config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, path) in [
            ("data_dir", &self.data_dir),
            ("font_path", &self.font_path),
            ("watermark_path", &self.watermark_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(format!("{} must not be empty", name)));
            }
        }

        if self.retry_delay_ms > MAX_RETRY_DELAY_MS {
            return Err(ConfigError::InvalidValue(format!(
                "retry_delay_ms must be at most {}",
                MAX_RETRY_DELAY_MS
            )));
        }

        Ok(())
    }

    /// Applies path overrides from the environment.
    ///
    /// `lookup` is `std::env::var` in production.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("ETIQUETAS_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(font) = lookup("ETIQUETAS_FONT") {
            debug!(font = %font, "Overriding font from environment");
            self.font_path = PathBuf::from(font);
        }

        if let Some(watermark) = lookup("ETIQUETAS_WATERMARK") {
            self.watermark_path = PathBuf::from(watermark);
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ar", "came", "etiquetas")
            .map(|dirs| dirs.config_dir().join("etiquetas.toml"))
    }

    /// Pause before the event log retry.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
