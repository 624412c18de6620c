//! CLI configuration
//!
//! Settings are merged in the following order (later overrides earlier):
//! 1. Built-in defaults
//! 2. `tmplfunc.toml` in the working directory, or the file given by `--config`
//! 3. Environment variables (`TMPLFUNC_*`)
//! 4. CLI flags (applied by the caller)

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Name of the optional config file looked up in the working directory
pub const CONFIG_FILE: &str = "tmplfunc.toml";

/// Default tracing filter
pub const DEFAULT_LOG: &str = "warn";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("expected 'text' or 'json', got '{}'", other)),
        }
    }
}

/// Contents of `tmplfunc.toml`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    output: Option<OutputFormat>,
    log: Option<String>,
    untyped: Option<bool>,
}

impl FileConfig {
    fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })
    }
}

/// Merged CLI configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Result format (`output` / TMPLFUNC_OUTPUT)
    pub output: OutputFormat,
    /// Tracing filter directive (`log` / TMPLFUNC_LOG)
    pub log: String,
    /// Load input arrays as `any[]` (`untyped` / TMPLFUNC_UNTYPED)
    pub untyped: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            log: DEFAULT_LOG.to_string(),
            untyped: false,
        }
    }
}

impl Config {
    /// Load file and environment layers
    ///
    /// An explicit path must exist; the default `tmplfunc.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::default();

        match explicit {
            Some(path) => config.apply_file(FileConfig::load(path)?),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    config.apply_file(FileConfig::load(path)?);
                }
            }
        }

        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(output) = file.output {
            self.output = output;
        }
        if let Some(log) = file.log {
            self.log = log;
        }
        if let Some(untyped) = file.untyped {
            self.untyped = untyped;
        }
    }

    /// Apply TMPLFUNC_* overrides read through `lookup`
    fn apply_env<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(output) = lookup("TMPLFUNC_OUTPUT") {
            self.output = output
                .parse()
                .map_err(|reason| ConfigError::InvalidValue {
                    field: "TMPLFUNC_OUTPUT".to_string(),
                    reason,
                })?;
        }
        if let Some(log) = lookup("TMPLFUNC_LOG") {
            self.log = log;
        }
        if let Some(untyped) = lookup("TMPLFUNC_UNTYPED") {
            self.untyped = matches!(untyped.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }
}
