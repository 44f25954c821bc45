//! Domain models for downloaded media.

mod asset;
mod download_state;
mod grouping;
mod playback;

pub use asset::{Asset, AssetKind, PlaybackInfo};
pub use download_state::{DownloadState, DownloadStateEvent};
pub use grouping::{episodes_of, group_by_series};
pub use playback::{PlaybackDescriptor, OFFLINE_SOURCE};
