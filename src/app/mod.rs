//! Application state and logic for the TUI.
//!
//! [`App`] owns a stack of downloads screens. The root lists everything;
//! opening a series pushes a screen scoped to it and `Esc` pops back.
//! Background work (loads, store events, the manifest watcher) reports
//! through [`AppMessage`] on one channel, drained by the main loop.

mod handlers;
mod keys;
mod messages;
mod navigation;

pub use messages::AppMessage;

use std::rc::Rc;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::adapters::{ChannelNavigator, FileAssetStore};
use crate::config::Config;
use crate::downloads::{DownloadsContext, DownloadsInteractor, DownloadsScreen};
use crate::traits::{AssetSource, MediaLauncher, Navigator, ScreenAnalytics};
use crate::ui::list_surface::ListSurface;

/// How long a status message stays up, in ticks (~3s at 16ms).
pub const STATUS_TICKS: u64 = 180;

/// A short message shown in the footer until it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFlash {
    pub message: String,
    pub expires_at: u64,
}

pub struct App {
    /// Screen stack; the last one is visible
    pub screens: Vec<DownloadsScreen<ListSurface>>,
    pub should_quit: bool,
    /// Animation tick counter
    pub tick_count: u64,
    /// Set when visible state changed since the last draw
    pub needs_redraw: bool,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the main loop for `select!`
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    context: DownloadsContext,
    launcher: Rc<dyn MediaLauncher>,
    manifest_store: Option<Arc<FileAssetStore>>,
    showcase_url: String,
    status: Option<StatusFlash>,
    observer: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(
        config: &Config,
        source: Arc<dyn AssetSource>,
        launcher: Rc<dyn MediaLauncher>,
        analytics: Rc<dyn ScreenAnalytics>,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let navigator: Rc<dyn Navigator> = Rc::new(ChannelNavigator::new(message_tx.clone()));
        let context = DownloadsContext {
            interactor: DownloadsInteractor::new(source),
            navigator,
            analytics,
            estimated_row_height: config.estimated_row_height,
        };

        Self {
            screens: Vec::new(),
            should_quit: false,
            tick_count: 0,
            needs_redraw: true,
            message_tx,
            message_rx: Some(message_rx),
            context,
            launcher,
            manifest_store: None,
            showcase_url: config.showcase_url.clone(),
            status: None,
            observer: None,
        }
    }

    /// Reload this store when [`AppMessage::ManifestChanged`] arrives.
    pub fn with_manifest_store(mut self, store: Arc<FileAssetStore>) -> Self {
        self.manifest_store = Some(store);
        self
    }

    /// Get a clone of the message sender for passing to async tasks
    pub fn message_sender(&self) -> mpsc::UnboundedSender<AppMessage> {
        self.message_tx.clone()
    }

    /// Forward store events to the loop and open `scope` as the root screen.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, scope: crate::downloads::DownloadsScope) {
        let tx = self.message_tx.clone();
        self.observer = Some(self.context.interactor.observe(move |event| {
            let _ = tx.send(AppMessage::DownloadStateChanged(event));
        }));
        self.push_screen(scope);
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance animations and expire the status message.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if self
            .status
            .as_ref()
            .is_some_and(|s| self.tick_count >= s.expires_at)
        {
            self.status = None;
            self.mark_dirty();
        }

        let loading = self
            .active_screen()
            .is_some_and(|s| *s.state() == crate::downloads::ScreenState::Loading);
        if loading && self.tick_count % 8 == 0 {
            self.mark_dirty();
        }
    }

    /// Current status message, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.message.as_str())
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(StatusFlash {
            message: message.into(),
            expires_at: self.tick_count.wrapping_add(STATUS_TICKS),
        });
        self.mark_dirty();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.abort();
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("screens", &self.screens.len())
            .field("should_quit", &self.should_quit)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
