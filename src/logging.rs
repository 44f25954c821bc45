//! Log setup.
//!
//! The terminal belongs to the UI, so logs go to `<data dir>/reel.log`.
//! The filter comes from the config (`log_filter`, overridable with `REEL_LOG`).

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{classify_io_error, ReelResult};

pub const LOG_FILE: &str = "reel.log";

/// Install the global subscriber. Returns the log file path.
pub fn init(data_dir: &Path, filter: &str) -> ReelResult<PathBuf> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| classify_io_error(e, Some(data_dir.to_path_buf()), "create data directory"))?;

    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| classify_io_error(e, Some(path.clone()), "open log file"))?;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(path)
}
