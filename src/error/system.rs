//! Filesystem and OS errors.

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SystemError {
    #[error("'{path}' does not exist")]
    NotFound { path: PathBuf },

    #[error("Permission denied: {operation} '{path}'")]
    PermissionDenied { path: PathBuf, operation: String },

    #[error("I/O error during {operation}{}: {message}", display_path(.path))]
    Io {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    #[error("Could not determine data directory")]
    NoDataDirectory,

    /// An external program (player, browser) could not be started.
    #[error("Failed to launch '{program}': {message}")]
    LaunchFailed { program: String, message: String },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at '{}'", p.display()))
        .unwrap_or_default()
}

impl SystemError {
    pub fn user_message(&self) -> String {
        match self {
            SystemError::NotFound { path } => format!("'{}' does not exist.", path.display()),
            SystemError::PermissionDenied { path, operation } => {
                format!("Not allowed to {} '{}'.", operation, path.display())
            }
            SystemError::Io { operation, .. } => format!("Could not {}.", operation),
            SystemError::NoDataDirectory => {
                "Could not determine where to keep downloads data. Set REEL_DATA_DIR.".to_string()
            }
            SystemError::LaunchFailed { program, .. } => format!("Could not start '{}'.", program),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SystemError::NotFound { .. } => "E_SYS_NOT_FOUND",
            SystemError::PermissionDenied { .. } => "E_SYS_PERM",
            SystemError::Io { .. } => "E_SYS_IO",
            SystemError::NoDataDirectory => "E_SYS_NO_DATA_DIR",
            SystemError::LaunchFailed { .. } => "E_SYS_LAUNCH",
        }
    }
}

/// Map an I/O error from `operation` on `path` to a [`SystemError`].
pub fn classify_io_error(err: std::io::Error, path: Option<PathBuf>, operation: &str) -> SystemError {
    match (err.kind(), path) {
        (ErrorKind::NotFound, Some(path)) => SystemError::NotFound { path },
        (ErrorKind::PermissionDenied, Some(path)) => SystemError::PermissionDenied {
            path,
            operation: operation.to_string(),
        },
        (_, path) => SystemError::Io {
            operation: operation.to_string(),
            path,
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_failed_message() {
        let err = SystemError::LaunchFailed {
            program: "mpv".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(err.user_message(), "Could not start 'mpv'.");
        assert_eq!(err.to_string(), "Failed to launch 'mpv': not found");
    }

    #[test]
    fn test_classify_not_found_with_path() {
        let io_err = std::io::Error::new(ErrorKind::NotFound, "gone");
        let err = classify_io_error(io_err, Some(PathBuf::from("/nope/file.mp4")), "remove");
        assert!(matches!(err, SystemError::NotFound { .. }));
        assert_eq!(err.error_code(), "E_SYS_NOT_FOUND");
    }

    #[test]
    fn test_classify_permission_denied() {
        let io_err = std::io::Error::new(ErrorKind::PermissionDenied, "denied");
        let err = classify_io_error(io_err, Some(PathBuf::from("/root/x")), "write");
        match err {
            SystemError::PermissionDenied { operation, .. } => assert_eq!(operation, "write"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_classify_without_path_keeps_message() {
        let io_err = std::io::Error::new(ErrorKind::NotFound, "weird");
        let err = classify_io_error(io_err, None, "rename");
        assert_eq!(err.error_code(), "E_SYS_IO");
        assert_eq!(err.to_string(), "I/O error during rename: weird");
    }
}
