//! Error handling for reel.
//!
//! Domain errors (`StoreError`, `ConfigError`, `SystemError`) convert into
//! the unified `ReelError`, which the screens and the status line read
//! through `user_message`, `error_code` and `is_retryable`.
//!
//! | Category | Raised by | Retryable |
//! |----------|-----------|-----------|
//! | Storage | Manifest reads, deletes | Manifest reads only |
//! | User | Selecting something not playable yet | No |
//! | System | Filesystem, launching the player | No |
//! | Configuration | Config file, command line | No |
//!
//! Wiring bugs in the list adapter (a row kind with no interpreter) are not
//! represented here: they panic at the first offending render.

mod category;
mod config;
mod context;
mod reel_error;
mod result;
mod store;
mod system;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use context::ErrorContext;
pub use reel_error::ReelError;
pub use result::ReelResult;
pub use store::StoreError;
pub use system::{classify_io_error, SystemError};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_unification() {
        let store_err: ReelError = StoreError::ManifestCorrupt {
            path: PathBuf::from("/data/downloads.json"),
            message: "expected value".to_string(),
        }
        .into();
        let config_err: ReelError = ConfigError::InvalidValue {
            key: "estimated_row_height".to_string(),
            message: "must be positive".to_string(),
        }
        .into();
        let sys_err: ReelError = SystemError::NoDataDirectory.into();

        assert_eq!(store_err.category(), ErrorCategory::Storage);
        assert_eq!(config_err.category(), ErrorCategory::Configuration);
        assert_eq!(sys_err.category(), ErrorCategory::System);

        for err in [&store_err, &config_err, &sys_err] {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let reel_err: ReelError = io_err.into();

        assert_eq!(reel_err.category(), ErrorCategory::System);
        assert!(matches!(reel_err, ReelError::System(SystemError::Io { .. })));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let reel_err: ReelError = json_err.into();

        assert!(matches!(
            reel_err,
            ReelError::Store(StoreError::Serialization { .. })
        ));
    }

    #[test]
    fn test_only_manifest_reads_are_retryable() {
        let retryable: ReelError = StoreError::ManifestUnreadable {
            path: PathBuf::from("/data/downloads.json"),
            message: "busy".to_string(),
        }
        .into();
        assert!(retryable.is_retryable());

        let not_retryable: Vec<ReelError> = vec![
            StoreError::AssetNotFound {
                asset_id: "a-1".to_string(),
            }
            .into(),
            ConfigError::NotFound {
                path: PathBuf::from("/etc/reel.json"),
            }
            .into(),
            SystemError::LaunchFailed {
                program: "mpv".to_string(),
                message: "missing".to_string(),
            }
            .into(),
        ];
        for err in not_retryable {
            assert!(!err.is_retryable(), "Expected {:?} to not be retryable", err);
        }
    }
}
