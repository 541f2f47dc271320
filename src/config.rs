//! User configuration for ZeroCrypt.
//!
//! Stored as TOML in `<config dir>/zerocrypt/config.toml`. A missing file
//! means defaults; command-line flags override whatever is loaded here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decoder::DecoderConfig;
use crate::method::Method;
use crate::stego::TrailingBits;

/// Default log level when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Errors that can occur when loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found. Unable to determine home directory.")]
    NoConfigDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

/// Persistent settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Method used when `--method` is not given.
    pub default_method: Method,

    /// Policy for hidden data that ends mid-character.
    pub trailing_bits: TrailingBits,

    /// Log level filter (e.g. "warn", "debug").
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_method: Method::default(),
            trailing_bits: TrailingBits::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Path to the configuration file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("zerocrypt").join("config.toml"))
    }

    /// Decoder settings derived from this configuration.
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            trailing_bits: self.trailing_bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.trailing_bits, TrailingBits::Reject);
        assert_eq!(config.default_method, Method::None);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            default_method: Method::Symmetric,
            trailing_bits: TrailingBits::Truncate,
            log_level: "debug".to_string(),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_method = \"asymmetric\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_method, Method::Asymmetric);
        assert_eq!(config.trailing_bits, TrailingBits::Reject);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_invalid_method_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_method = \"rot13\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::TomlParseError(_))
        ));
    }

    #[test]
    fn test_decoder_config() {
        let config = Config {
            trailing_bits: TrailingBits::Truncate,
            ..Default::default()
        };
        assert_eq!(config.decoder_config().trailing_bits, TrailingBits::Truncate);
    }
}
