//! Unified error type for reel.

use std::fmt;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::context::ErrorContext;
use super::store::StoreError;
use super::system::SystemError;

/// Unified error type for reel.
///
/// Consolidates the domain-specific error types so the screen can render
/// any failure the same way: a message, a code, and whether retry is offered.
#[derive(Debug)]
pub enum ReelError {
    /// Download store errors (manifest, assets, media files).
    Store(StoreError),

    /// Configuration loading errors.
    Config(ConfigError),

    /// System/filesystem errors.
    System(SystemError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<ReelError>,
        context: ErrorContext,
    },
}

impl ReelError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReelError::Store(err) => match err {
                StoreError::Io(_) => ErrorCategory::System,
                StoreError::NotPlayable { .. } => ErrorCategory::User,
                _ => ErrorCategory::Storage,
            },
            ReelError::Config(_) => ErrorCategory::Configuration,
            ReelError::System(_) => ErrorCategory::System,
            ReelError::WithContext { error, .. } => error.category(),
        }
    }

    /// Whether the error screen offers a retry. Only store reads can
    /// succeed on a second attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReelError::Store(err) => err.is_retryable(),
            ReelError::Config(_) | ReelError::System(_) => false,
            ReelError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ReelError::Store(err) => err.user_message(),
            ReelError::Config(err) => err.to_string(),
            ReelError::System(err) => err.user_message(),
            ReelError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ReelError::Store(err) => err.error_code(),
            ReelError::Config(err) => err.error_code(),
            ReelError::System(err) => err.error_code(),
            ReelError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        ReelError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }
}

impl fmt::Display for ReelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReelError::Store(err) => write!(f, "{}", err),
            ReelError::Config(err) => write!(f, "{}", err),
            ReelError::System(err) => write!(f, "{}", err),
            ReelError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for ReelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReelError::Store(err) => Some(err),
            ReelError::Config(err) => Some(err),
            ReelError::System(err) => Some(err),
            ReelError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<StoreError> for ReelError {
    fn from(err: StoreError) -> Self {
        ReelError::Store(err)
    }
}

impl From<ConfigError> for ReelError {
    fn from(err: ConfigError) -> Self {
        ReelError::Config(err)
    }
}

impl From<SystemError> for ReelError {
    fn from(err: SystemError) -> Self {
        ReelError::System(err)
    }
}

impl From<std::io::Error> for ReelError {
    fn from(err: std::io::Error) -> Self {
        use super::system::classify_io_error;
        ReelError::System(classify_io_error(err, None, "I/O operation"))
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        ReelError::Store(StoreError::Serialization {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_playable_is_user_category() {
        let err: ReelError = StoreError::NotPlayable {
            asset_id: "m-1".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::User);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_context_keeps_code_and_retry() {
        let err: ReelError = StoreError::ManifestUnreadable {
            path: PathBuf::from("downloads.json"),
            message: "busy".to_string(),
        }
        .into();
        let wrapped = err
            .with_context(ErrorContext::new("inner"))
            .with_context(ErrorContext::new("outer"));

        assert_eq!(wrapped.error_code(), "E_STORE_UNREADABLE");
        assert_eq!(wrapped.category(), ErrorCategory::Storage);
        assert!(wrapped.is_retryable());
    }

    #[test]
    fn test_system_errors_are_not_retryable() {
        let err: ReelError = SystemError::NoDataDirectory.into();
        assert!(!err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::System);
    }

    #[test]
    fn test_display_includes_context() {
        let err: ReelError = StoreError::ManifestCorrupt {
            path: PathBuf::from("downloads.json"),
            message: "eof".to_string(),
        }
        .into();
        let shown = err
            .with_context(ErrorContext::new("load_downloads"))
            .to_string();
        assert!(shown.contains("downloads.json"));
        assert!(shown.contains("[load_downloads]"));
    }
}
