//! Message handling for the App.

use tracing::{debug, info, warn};

use crate::traits::Destination;

use super::{App, AppMessage};

impl App {
    /// Handle an incoming async message
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::DownloadsLoaded { screen, outcome } => {
                match self.screens.iter_mut().find(|s| s.id() == screen) {
                    Some(target) => target.handle_load(outcome),
                    None => debug!(%screen, "load finished for a closed screen"),
                }
            }
            AppMessage::DownloadStateChanged(event) => {
                for screen in &mut self.screens {
                    screen.handle_state_change(&event);
                }
            }
            AppMessage::Navigate(destination) => self.navigate(destination),
            AppMessage::ManifestChanged => self.reload_manifest(),
        }
    }

    fn navigate(&mut self, destination: Destination) {
        match destination {
            Destination::SeriesDetail { series_id, title } => {
                self.push_screen(crate::downloads::DownloadsScope::Series { series_id, title });
            }
            Destination::Showcase => {
                if let Err(e) = self.launcher.open_url(&self.showcase_url) {
                    warn!(code = e.error_code(), "could not open showcase: {}", e);
                    self.set_status(e.user_message());
                }
            }
            Destination::Player(descriptor) => match self.launcher.play(&descriptor) {
                Ok(()) => self.set_status(format!("Playing {}", descriptor.title)),
                Err(e) => {
                    warn!(
                        asset_id = %descriptor.asset_id,
                        code = e.error_code(),
                        "could not start playback: {}",
                        e
                    );
                    self.set_status(e.user_message());
                }
            },
        }
    }

    /// Re-read the manifest. Status changes were already broadcast by the
    /// store; added or removed assets need a full reload of every screen.
    fn reload_manifest(&mut self) {
        let Some(store) = self.manifest_store.clone() else {
            return;
        };
        match store.reload_from_disk() {
            Ok(diff) if diff.is_structural() => {
                info!(
                    added = diff.added.len(),
                    removed = diff.removed.len(),
                    "manifest changed, reloading"
                );
                self.refresh_all();
            }
            Ok(diff) => debug!(changed = diff.changed.len(), "manifest states changed"),
            Err(e) => {
                warn!(code = e.error_code(), "manifest reload failed: {}", e);
                self.set_status(e.user_message());
            }
        }
    }
}
