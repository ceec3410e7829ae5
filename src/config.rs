//! TOML configuration. Every field has a default, so an empty or missing file gives the
//! stock behavior: 3 s splash, 400x400 level L symbols, `QRCode.png` in the user's
//! Downloads and Pictures directories.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::encoder::{ECLevel, DEFAULT_QUIET_ZONE, DEFAULT_SIZE, MAX_QUIET_ZONE, MAX_SIZE};
use crate::error::ConfigError;
use crate::platform::PermissionStatus;

pub const APP_NAME: &str = "qrsnap";
pub const DEFAULT_FILENAME: &str = "QRCode.png";
pub const DEFAULT_AUTHORITY: &str = "com.app.qrcodegenerator.fileprovider";
pub const DEFAULT_SPLASH_MS: u64 = 3000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub splash: SplashConfig,
    pub encoder: EncoderConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplashConfig {
    pub delay_ms: u64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self { delay_ms: DEFAULT_SPLASH_MS }
    }
}

impl SplashConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    pub size: u32,
    pub quiet_zone: u32,
    pub ec_level: ECLevel,
    /// WHATWG encoding label used to turn the text into bytes.
    pub charset: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            quiet_zone: DEFAULT_QUIET_ZONE,
            ec_level: ECLevel::L,
            charset: "utf-8".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub filename: String,
    pub downloads_dir: Option<PathBuf>,
    pub pictures_dir: Option<PathBuf>,
    pub authority: String,
    pub permission: PermissionStatus,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            downloads_dir: None,
            pictures_dir: None,
            authority: DEFAULT_AUTHORITY.to_string(),
            permission: PermissionStatus::Prompt,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), file: None }
    }
}

impl Config {
    /// Loads the default config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = resolve_config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config = Self::parse(&content)?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.encoder.size == 0 || self.encoder.size > MAX_SIZE {
            return Err(ConfigError::Invalid {
                field: "encoder.size",
                reason: format!("must be between 1 and {MAX_SIZE}"),
            });
        }

        if self.encoder.quiet_zone > MAX_QUIET_ZONE {
            return Err(ConfigError::Invalid {
                field: "encoder.quiet_zone",
                reason: format!("must be at most {MAX_QUIET_ZONE}"),
            });
        }

        let name = &self.storage.filename;
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "storage.filename",
                reason: format!("{name:?} is not a plain file name"),
            });
        }

        if self.storage.authority.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage.authority",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Log file from config, else `<data dir>/qrsnap/qrsnap.log`, else the working directory.
    pub fn log_file(&self) -> PathBuf {
        self.logging.file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join(APP_NAME).join(format!("{APP_NAME}.log")))
                .unwrap_or_else(|| PathBuf::from(format!("{APP_NAME}.log")))
        })
    }
}

/// `<config dir>/qrsnap/config.toml`
pub fn resolve_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join(APP_NAME).join("config.toml"))
}
