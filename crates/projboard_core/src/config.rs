//! Board configuration.
//!
//! # Responsibility
//! - Name the host container and templates components mount with.
//! - Carry logging settings for hosts that initialize logging.
//! - Load a JSON config file, then apply environment overrides.
//!
//! # Invariants
//! - Every id is non-empty.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level};
use crate::ui::memory::{APP_HOST_ID, INPUT_TEMPLATE_ID, ITEM_TEMPLATE_ID, LIST_TEMPLATE_ID};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_FILE: &str = "PROJBOARD_CONFIG";
pub const ENV_HOST_ID: &str = "PROJBOARD_HOST_ID";
pub const ENV_LOG_LEVEL: &str = "PROJBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PROJBOARD_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(&'static str),
    UnsupportedLogLevel(String),
    RelativeLogDir(PathBuf),
    Unreadable { path: PathBuf, message: String },
    Malformed(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(field) => write!(f, "config value `{field}` cannot be empty"),
            Self::UnsupportedLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir(path) => {
                write!(f, "log_dir must be an absolute path, got `{}`", path.display())
            }
            Self::Unreadable { path, message } => {
                write!(f, "cannot read config file `{}`: {message}", path.display())
            }
            Self::Malformed(message) => write!(f, "malformed board config: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Mount points and logging settings for one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub host_id: String,
    pub input_template_id: String,
    pub list_template_id: String,
    pub item_template_id: String,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            host_id: APP_HOST_ID.to_string(),
            input_template_id: INPUT_TEMPLATE_ID.to_string(),
            list_template_id: LIST_TEMPLATE_ID.to_string(),
            item_template_id: ITEM_TEMPLATE_ID.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl BoardConfig {
    /// Loads the config named by `PROJBOARD_CONFIG` (or the defaults),
    /// then applies the other `PROJBOARD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|key| std::env::var(key).ok())
    }

    /// [`BoardConfig::from_env`] over an arbitrary variable lookup.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base = match lookup(ENV_CONFIG_FILE).filter(|path| !path.trim().is_empty()) {
            Some(path) => Self::from_file(Path::new(path.trim()))?,
            None => Self::default(),
        };
        base.with_overrides(lookup)
    }

    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Unreadable {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_json(&raw)
    }

    /// Parses and validates a JSON config. Missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Malformed(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from `lookup`, then validates the result.
    ///
    /// Blank override values are ignored.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        if let Some(host_id) = value(ENV_HOST_ID) {
            self.host_id = host_id;
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(dir) = value(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("host_id", &self.host_id),
            ("input_template_id", &self.input_template_id),
            ("list_template_id", &self.list_template_id),
            ("item_template_id", &self.item_template_id),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyValue(field));
            }
        }
        normalize_level(&self.log_level)
            .map_err(|_| ConfigError::UnsupportedLogLevel(self.log_level.clone()))?;
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        Ok(())
    }
}
