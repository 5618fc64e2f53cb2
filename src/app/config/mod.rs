use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

pub mod user;

pub use user::UserConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("interval_ms must be positive")]
    ZeroInterval,
    #[error("request_timeout_ms must be positive")]
    ZeroTimeout,
}

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("nowplaying")
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_log_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(Self::get_config_dir)
            .join("nowplaying")
    }

    /// Load `config.toml`.
    ///
    /// With no explicit path the default location is used and a default file
    /// is written there on first run. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<UserConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::get_config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    let config = UserConfig::default();
                    Self::write_default(&path, &config);
                    Ok(config)
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<UserConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The default config as it would be written to disk.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&UserConfig::default()).unwrap_or_default()
    }

    fn write_default(path: &Path, config: &UserConfig) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(error = %e, "could not create config directory");
                return;
            }
        }
        match toml::to_string_pretty(config) {
            Ok(content) => {
                if let Err(e) = fs::write(path, content) {
                    warn!(path = %path.display(), error = %e, "could not write default config");
                }
            }
            Err(e) => warn!(error = %e, "could not serialize default config"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nowplaying-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_explicit_file() {
        let path = scratch_file("ok.toml", "interval_ms = 5000\nheader = \"On Repeat\"\n");
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.interval_ms, 5000);
        assert_eq!(config.header, "On Repeat");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let path = std::env::temp_dir().join("nowplaying-definitely-missing.toml");
        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_load_broken_file() {
        let path = scratch_file("broken.toml", "interval_ms = \"soon\"\n");
        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_default_toml_parses() {
        let config: UserConfig = toml::from_str(&AppConfig::default_toml()).unwrap();
        assert_eq!(config, UserConfig::default());
    }
}
