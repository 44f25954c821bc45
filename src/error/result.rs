//! Result alias used across the crate.

use super::reel_error::ReelError;

pub type ReelResult<T> = Result<T, ReelError>;
