use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration for the access log analyzer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where uploaded logs are staged
    #[serde(default)]
    pub input: InputConfig,
    /// Detection rules configuration
    #[serde(default)]
    pub detection: DetectionConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Sample log generator configuration
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Input staging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory that receives uploaded log files
    pub upload_dir: PathBuf,
    /// File name the latest upload is stored under
    pub file_name: String,
}

impl InputConfig {
    /// Location of the staged log file
    pub fn staged_path(&self) -> PathBuf {
        self.upload_dir.join(&self.file_name)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            upload_dir: PathBuf::from("uploads"),
            file_name: "temp.log".to_string(),
        }
    }
}

/// Detection rules configuration
///
/// Thresholds are strict: a rule fires only when the measured count is
/// greater than the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Enable the per-IP request volume rule
    pub enable_high_frequency: bool,
    /// Enable the per-IP 4xx/5xx volume rule
    pub enable_error_rate: bool,
    /// Enable sensitive path probing detection
    pub enable_suspicious_path: bool,
    /// Enable failed login detection
    pub enable_failed_logins: bool,
    /// Requests per IP above which traffic is flagged
    pub high_frequency_threshold: usize,
    /// Error responses per IP above which traffic is flagged
    pub error_rate_threshold: usize,
    /// 401 responses on login paths per IP above which traffic is flagged
    pub failed_login_threshold: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            enable_high_frequency: true,
            enable_error_rate: true,
            enable_suspicious_path: true,
            enable_failed_logins: true,
            high_frequency_threshold: 1000,
            error_rate_threshold: 50,
            failed_login_threshold: 5,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "console", "json", "jsonl" or "html"
    pub format: String,
    /// Output file path, stdout when unset
    pub file_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: "console".to_string(),
            file_path: None,
        }
    }
}

/// Sample log generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Where generated logs are written
    pub output_path: PathBuf,
    /// Number of lines to generate
    pub entries: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            output_path: PathBuf::from("sample_logs/access.log"),
            entries: 10_000,
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
