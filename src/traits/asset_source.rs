//! Download store abstraction.

use tokio::sync::broadcast;

use crate::error::ReelResult;
use crate::models::{Asset, DownloadStateEvent};

/// Read and prune access to locally downloaded assets.
///
/// Implementations are shared between the UI task and background load jobs,
/// so they must be `Send + Sync`. State changes are pushed through a
/// broadcast channel; each subscriber gets its own receiver.
pub trait AssetSource: Send + Sync {
    /// Every downloaded movie plus one synthesized series asset per series.
    fn all_assets(&self) -> ReelResult<Vec<Asset>>;

    /// Episodes of `series_id`, in season/episode order.
    fn episode_assets(&self, series_id: &str) -> ReelResult<Vec<Asset>>;

    /// Cancel and delete a download. Deleting a series deletes its episodes.
    fn delete(&self, asset_id: &str) -> ReelResult<()>;

    /// The asset, if it is completed and has a local media file.
    fn ready_to_play(&self, asset_id: &str) -> Option<Asset>;

    fn subscribe(&self) -> broadcast::Receiver<DownloadStateEvent>;
}
