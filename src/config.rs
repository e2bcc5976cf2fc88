//! YAML configuration for the sqlfp pipeline and CLI.
//!
//! The canonical and index crates take no configuration; everything here
//! is about where sources come from, how the run is scheduled and where
//! the report goes.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1"
//!
//! input:
//!   paths: ["./sql_files"]
//!   extension: "sql"
//!
//! pipeline:
//!   use_parallel: false
//!
//! output:
//!   path: "./sql_analysis_output/fingerprints.json"
//!   pretty: true
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct SqlfpConfig {
    /// Configuration format version
    #[serde(default = "default_format_version")]
    pub version: String,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SqlfpConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SqlfpConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section. Called by the loaders; call it again after
    /// applying command-line overrides.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.input.validate()?;
        self.output.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

impl Default for SqlfpConfig {
    fn default() -> Self {
        Self {
            version: default_format_version(),
            input: InputConfig::default(),
            pipeline: PipelineConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Where source files are discovered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Files or directories; directories are walked recursively.
    #[serde(default = "default_input_paths")]
    pub paths: Vec<PathBuf>,

    /// File extension to keep, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl InputConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.extension.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "input.extension must not be empty".to_string(),
            ));
        }
        if self.extension.starts_with('.') {
            return Err(ConfigLoadError::Validation(
                "input.extension must not start with '.'".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            paths: default_input_paths(),
            extension: default_extension(),
        }
    }
}

/// Scheduling of the canonicalization step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Canonicalize statements on the rayon pool. The index fold stays
    /// sequential, so the result is identical either way.
    #[serde(default)]
    pub use_parallel: bool,
}

/// Where the hand-off report is written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    #[serde(default = "true_value")]
    pub pretty: bool,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "output.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// A level (`info`) or a filter directive (`sqlfp=debug,index=trace`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        let level = self.level.trim();
        if level.contains('=') || tracing::Level::from_str(level).is_ok() {
            return Ok(());
        }
        Err(ConfigLoadError::Validation(format!(
            "logging.level `{}` is neither a level nor a filter directive",
            self.level
        )))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_format_version() -> String {
    "1".to_string()
}
fn default_input_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("./sql_files")]
}
fn default_extension() -> String {
    "sql".to_string()
}
fn default_output_path() -> PathBuf {
    PathBuf::from("./sql_analysis_output/fingerprints.json")
}
fn default_log_level() -> String {
    "info".to_string()
}
fn true_value() -> bool {
    true
}
