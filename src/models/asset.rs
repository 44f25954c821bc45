use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::DownloadState;

/// What an asset is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    Movie,
    Episode,
    /// Synthesized by the store to group episodes; never persisted.
    Series,
}

/// Where the downloaded media lives and how far it has been watched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlaybackInfo {
    /// Local media file
    pub location: PathBuf,
    #[serde(default)]
    pub duration_secs: Option<u64>,
    #[serde(default)]
    pub watch_position_secs: Option<u64>,
}

impl PlaybackInfo {
    /// Fraction of the asset already watched, 0.0 when unknown.
    pub fn watch_progress(&self) -> f32 {
        match (self.watch_position_secs, self.duration_secs) {
            (Some(position), Some(duration)) if duration > 0 => {
                (position as f32 / duration as f32).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}

/// A downloaded (or downloading) media asset as recorded in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub kind: AssetKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Poster stored next to the media
    #[serde(default)]
    pub poster_path: Option<PathBuf>,
    #[serde(default)]
    pub season_number: Option<u32>,
    #[serde(default)]
    pub episode_number: Option<u32>,
    #[serde(default)]
    pub series_id: Option<String>,
    #[serde(default)]
    pub series_title: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub playback: Option<PlaybackInfo>,
    #[serde(default)]
    pub byte_count: u64,
    #[serde(default)]
    pub state: DownloadState,
    /// When the download was requested; newest first in lists
    #[serde(default)]
    pub downloaded_at: Option<DateTime<Utc>>,
    /// Only populated on synthesized series assets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<Asset>,
}

impl Asset {
    /// A bare asset with only an id, title and kind set.
    pub fn new(id: impl Into<String>, kind: AssetKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            original_title: None,
            poster_url: None,
            poster_path: None,
            season_number: None,
            episode_number: None,
            series_id: None,
            series_title: None,
            release_date: None,
            playback: None,
            byte_count: 0,
            state: DownloadState::Queued,
            downloaded_at: None,
            episodes: Vec::new(),
        }
    }

    pub fn is_series(&self) -> bool {
        self.kind == AssetKind::Series
    }

    pub fn is_episode(&self) -> bool {
        self.kind == AssetKind::Episode
    }

    /// Completed and pointing at a media file.
    pub fn is_ready_to_play(&self) -> bool {
        self.state.is_completed() && self.playback.is_some()
    }

    /// Sort key for episodes inside a series.
    pub fn episode_order(&self) -> (u32, u32) {
        (
            self.season_number.unwrap_or(0),
            self.episode_number.unwrap_or(0),
        )
    }

    /// Total size, including episodes for a series.
    pub fn total_byte_count(&self) -> u64 {
        if self.episodes.is_empty() {
            self.byte_count
        } else {
            self.episodes.iter().map(|e| e.byte_count).sum()
        }
    }
}
