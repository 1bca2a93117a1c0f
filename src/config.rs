use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration for a log analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input log configuration
    pub input: InputConfig,
    /// Detection rules configuration
    pub detection: DetectionConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Input log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the access log to analyze
    pub log_path: PathBuf,
}

/// Detection rules configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// IPs with strictly more failed logins than this are flagged
    pub failed_login_threshold: u64,
    /// HTTP status that counts as a failed login
    pub auth_failure_status: u16,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV results file
    pub csv_path: PathBuf,
    /// HTML report file
    pub html_path: PathBuf,
    /// Optional JSON export of the full report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_path: Option<PathBuf>,
    /// Number of rows shown per table in the terminal summary
    pub top_n: usize,
    /// Print the terminal summary
    pub terminal: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            log_path: PathBuf::from("sample.log"),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            failed_login_threshold: 10,
            auth_failure_status: 401,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            csv_path: PathBuf::from("web_log_analysis_results.csv"),
            html_path: PathBuf::from("web_log_analysis_report.html"),
            json_path: None,
            top_n: 10,
            terminal: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
