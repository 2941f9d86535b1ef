use crate::error::{QrError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_MODULE_SIZE: u32 = 10;

/// Environment variable overriding the base directory for config and history.
pub const HOME_ENV: &str = "QR_GENERATOR_HOME";

/// Configuration for qr, stored in `<base>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QrConfig {
    /// Pixels per QR module in PNG output (SVG uses the same unit size)
    #[serde(default = "default_module_size")]
    pub module_size: u32,

    /// Surround the symbol with the standard 4-module quiet zone
    #[serde(default = "default_quiet_zone")]
    pub quiet_zone: bool,

    /// How many history entries `qr history` shows when no --limit is given
    #[serde(default)]
    pub history_limit: Option<usize>,
}

fn default_module_size() -> u32 {
    DEFAULT_MODULE_SIZE
}

fn default_quiet_zone() -> bool {
    true
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            module_size: DEFAULT_MODULE_SIZE,
            quiet_zone: true,
            history_limit: None,
        }
    }
}

impl QrConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(QrError::Io)?;
        let config: QrConfig = serde_json::from_str(&content).map_err(QrError::Serialization)?;
        Ok(config)
    }
}

/// Base directory for config and history: `$QR_GENERATOR_HOME` when set,
/// otherwise the platform config dir.
pub fn base_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    directories::ProjectDirs::from("com", "qr-generator", "qr-generator")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| QrError::Api("Could not determine config dir".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = QrConfig::default();
        assert_eq!(config.module_size, 10);
        assert!(config.quiet_zone);
        assert_eq!(config.history_limit, None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = QrConfig::load(temp.path()).unwrap();
        assert_eq!(config, QrConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"history_limit": 5}"#).unwrap();

        let config = QrConfig::load(temp.path()).unwrap();
        assert_eq!(config.history_limit, Some(5));
        assert_eq!(config.module_size, 10);
        assert!(config.quiet_zone);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "module_size = 3").unwrap();
        assert!(matches!(
            QrConfig::load(temp.path()),
            Err(QrError::Serialization(_))
        ));
    }
}
