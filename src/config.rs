//! Runtime configuration.
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. the config file (`--config <path>`, else `<config dir>/reel/config.json`)
//! 3. environment: `REEL_DATA_DIR`, `REEL_LOG`
//! 4. command-line options
//!
//! A missing default config file means defaults. A missing file named with
//! `--config` is an error.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::RunOptions;
use crate::error::{ConfigError, ReelResult, SystemError};
use crate::table::DEFAULT_ESTIMATED_ROW_HEIGHT;

pub const APP_DIR: &str = "reel";
pub const CONFIG_FILE: &str = "config.json";
pub const ENV_DATA_DIR: &str = "REEL_DATA_DIR";
pub const ENV_LOG: &str = "REEL_LOG";

pub const DEFAULT_SHOWCASE_URL: &str = "https://www.themoviedb.org/movie";
pub const DEFAULT_LOG_FILTER: &str = "reel=info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where `downloads.json`, the media and the log live.
    /// `None` resolves to `<data dir>/reel`.
    pub data_dir: Option<PathBuf>,
    pub estimated_row_height: u16,
    pub showcase_url: String,
    /// Player program plus arguments; the media path is appended.
    pub player_command: Option<String>,
    pub log_filter: String,
    pub watch_manifest: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            estimated_row_height: DEFAULT_ESTIMATED_ROW_HEIGHT,
            showcase_url: DEFAULT_SHOWCASE_URL.to_string(),
            player_command: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            watch_manifest: true,
        }
    }
}

impl Config {
    /// Resolve the full configuration for a run.
    pub fn load(options: &RunOptions) -> ReelResult<Self> {
        let mut config = match &options.config {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) => Self::from_file_if_present(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        if let Some(dir) = &options.data_dir {
            config.data_dir = Some(dir.clone());
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn from_file_if_present(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::NotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Apply environment overrides read through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(filter) = var(ENV_LOG).filter(|v| !v.is_empty()) {
            self.log_filter = filter;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimated_row_height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "estimated_row_height".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.showcase_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "showcase_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The data directory, falling back to the platform data dir.
    pub fn resolved_data_dir(&self) -> ReelResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| SystemError::NoDataDirectory.into())
    }
}

/// `<config dir>/reel/config.json`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "player_command": "mpv --fs" }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.player_command.as_deref(), Some("mpv --fs"));
        assert_eq!(config.estimated_row_height, DEFAULT_ESTIMATED_ROW_HEIGHT);
        assert!(config.watch_manifest);
    }

    #[test]
    fn test_missing_named_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert_eq!(
            Config::from_file_if_present(&dir.path().join("nope.json")).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ estimated_row_height: ").unwrap();
        assert!(matches!(
            Config::from_file(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_DATA_DIR, "/srv/media"), (ENV_LOG, "reel=debug")]);
        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/media")));
        assert_eq!(config.log_filter, "reel=debug");
    }

    #[test]
    fn test_zero_row_height_is_invalid() {
        let config = Config {
            estimated_row_height: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidValue { ref key, .. } if key == "estimated_row_height"
        ));
    }

    #[test]
    #[serial]
    fn test_load_precedence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "data_dir": "/from/file", "log_filter": "warn" }"#).unwrap();
        std::env::set_var(ENV_DATA_DIR, "/from/env");
        std::env::remove_var(ENV_LOG);

        let from_env = Config::load(&RunOptions {
            config: Some(path.clone()),
            ..Default::default()
        })
        .unwrap();
        let from_cli = Config::load(&RunOptions {
            config: Some(path),
            data_dir: Some(PathBuf::from("/from/cli")),
            series: None,
        })
        .unwrap();
        std::env::remove_var(ENV_DATA_DIR);

        assert_eq!(from_env.data_dir, Some(PathBuf::from("/from/env")));
        assert_eq!(from_env.log_filter, "warn");
        assert_eq!(from_cli.data_dir, Some(PathBuf::from("/from/cli")));
    }
}
