//! Watches the downloads manifest for changes made by the downloader.
//!
//! `notify` reports every write and rename separately, and a downloader
//! replacing the manifest atomically produces a burst of them. Events are
//! coalesced until the directory has been quiet for the debounce window,
//! then one [`AppMessage::ManifestChanged`] is posted.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::AppMessage;
use crate::error::{ReelResult, SystemError};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Keeps the watch alive. Dropping it stops watching.
pub struct ManifestWatcher {
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl ManifestWatcher {
    /// Watch `manifest_path` and post `ManifestChanged` on `message_tx`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn(
        manifest_path: &Path,
        debounce: Duration,
        message_tx: mpsc::UnboundedSender<AppMessage>,
    ) -> ReelResult<Self> {
        let dir = manifest_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        let file_name = manifest_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();

        let (raw_tx, raw_rx) = mpsc::unbounded_channel::<()>();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if touches_manifest(&event, &file_name) => {
                    debug!(kind = ?event.kind, "manifest watch event");
                    let _ = raw_tx.send(());
                }
                Ok(_) => {}
                Err(e) => warn!("manifest watch error: {}", e),
            },
            Config::default(),
        )
        .map_err(|e| watch_error(&dir, e))?;
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| watch_error(&dir, e))?;
        info!(path = %manifest_path.display(), "watching downloads manifest");

        let task = tokio::spawn(debounce_events(raw_rx, debounce, move || {
            message_tx.send(AppMessage::ManifestChanged).is_ok()
        }));
        Ok(Self {
            _watcher: watcher,
            task,
        })
    }
}

impl Drop for ManifestWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn watch_error(dir: &Path, err: notify::Error) -> SystemError {
    SystemError::Io {
        operation: "watch downloads manifest".to_string(),
        path: Some(dir.to_path_buf()),
        message: err.to_string(),
    }
}

fn touches_manifest(event: &Event, file_name: &OsString) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

/// Call `forward` once per burst of events separated by at least `quiet`.
/// Stops when the event source closes or `forward` returns false.
async fn debounce_events<F>(mut events: mpsc::UnboundedReceiver<()>, quiet: Duration, forward: F)
where
    F: Fn() -> bool,
{
    while events.recv().await.is_some() {
        loop {
            match tokio::time::timeout(quiet, events.recv()).await {
                Ok(Some(())) => continue,
                Ok(None) => {
                    forward();
                    return;
                }
                Err(_) => break,
            }
        }
        if !forward() {
            return;
        }
    }
}
