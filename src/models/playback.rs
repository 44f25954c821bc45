use std::path::PathBuf;

use super::Asset;

/// Screen name the player is told it was opened from.
pub const OFFLINE_SOURCE: &str = "offline";

/// Everything the player needs to start a local asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackDescriptor {
    pub asset_id: String,
    pub title: String,
    pub location: PathBuf,
    pub resume_position_secs: u64,
    pub duration_secs: Option<u64>,
    pub source: &'static str,
}

impl PlaybackDescriptor {
    /// Build from an asset with a local media location; `None` otherwise.
    pub fn from_asset(asset: &Asset) -> Option<Self> {
        let playback = asset.playback.as_ref()?;
        if playback.location.as_os_str().is_empty() {
            return None;
        }
        Some(Self {
            asset_id: asset.id.clone(),
            title: asset.title.clone(),
            location: playback.location.clone(),
            resume_position_secs: playback.watch_position_secs.unwrap_or(0),
            duration_secs: playback.duration_secs,
            source: OFFLINE_SOURCE,
        })
    }
}
