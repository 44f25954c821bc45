//! Error category classification.

use std::fmt;

/// High-level grouping of errors, recorded with every logged failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Download store errors (manifest unreadable, asset missing).
    Storage,

    /// Nothing went wrong, but the user picked something that cannot be
    /// acted on yet.
    User,

    /// System/OS errors (filesystem, permissions, launching programs).
    System,

    /// Configuration errors (unreadable or invalid config file, bad flags).
    Configuration,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Storage => "storage",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
