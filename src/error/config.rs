//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file '{path}' not found")]
    NotFound { path: PathBuf },

    #[error("Config file '{path}' could not be parsed: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown command-line argument '{0}'")]
    UnknownArgument(String),

    #[error("Missing value for '{0}'")]
    MissingValue(String),
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::NotFound { .. } => "E_CFG_NOT_FOUND",
            ConfigError::Parse { .. } => "E_CFG_PARSE",
            ConfigError::InvalidValue { .. } => "E_CFG_INVALID",
            ConfigError::UnknownArgument(_) => "E_CFG_ARG",
            ConfigError::MissingValue(_) => "E_CFG_ARG_VALUE",
        }
    }
}
