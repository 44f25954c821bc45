//! AppMessage enum for async communication within the application.

use crate::downloads::{LoadOutcome, ScreenId};
use crate::models::DownloadStateEvent;
use crate::traits::Destination;

/// Messages posted to the UI loop from background tasks and adapters.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A list load finished for the screen with this id
    DownloadsLoaded { screen: ScreenId, outcome: LoadOutcome },
    /// The store reported a progress or status change
    DownloadStateChanged(DownloadStateEvent),
    /// A screen asked to go somewhere
    Navigate(Destination),
    /// The manifest file changed on disk
    ManifestChanged,
}
