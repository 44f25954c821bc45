//! Domain access for the downloads screen.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ReelResult;
use crate::models::{Asset, DownloadStateEvent};
use crate::traits::AssetSource;

/// Thin wrapper over an [`AssetSource`], cheap to clone into load jobs.
#[derive(Clone)]
pub struct DownloadsInteractor {
    source: Arc<dyn AssetSource>,
}

impl DownloadsInteractor {
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self { source }
    }

    pub fn all_assets(&self) -> ReelResult<Vec<Asset>> {
        self.source.all_assets()
    }

    pub fn episode_assets(&self, series_id: &str) -> ReelResult<Vec<Asset>> {
        self.source.episode_assets(series_id)
    }

    /// Cancel and delete each asset. A failure is logged and the rest of
    /// the batch still runs. Returns how many deletes succeeded.
    pub fn delete_assets(&self, asset_ids: &[&str]) -> usize {
        let mut deleted = 0;
        for id in asset_ids {
            match self.source.delete(id) {
                Ok(()) => {
                    info!(asset_id = %id, "deleted download");
                    deleted += 1;
                }
                Err(err) => {
                    warn!(
                        asset_id = %id,
                        code = err.error_code(),
                        category = %err.category(),
                        "failed to delete download: {}",
                        err
                    );
                }
            }
        }
        deleted
    }

    /// The asset if it can be played right now.
    pub fn downloaded_asset(&self, asset_id: &str) -> Option<Asset> {
        self.source.ready_to_play(asset_id)
    }

    /// Forward store state events to `forward` until the store goes away.
    ///
    /// Must be called from within a tokio runtime. Abort the returned handle
    /// to stop forwarding.
    pub fn observe<F>(&self, forward: F) -> JoinHandle<()>
    where
        F: Fn(DownloadStateEvent) + Send + 'static,
    {
        let mut events = self.source.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        debug!(asset_id = %event.asset_id, "download state changed");
                        forward(event);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "download state observer lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

impl std::fmt::Debug for DownloadsInteractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadsInteractor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemoryAssetSource;
    use crate::models::{AssetKind, DownloadState, PlaybackInfo};
    use std::path::PathBuf;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn source() -> Arc<InMemoryAssetSource> {
        let mut ready = Asset::new("m-1", AssetKind::Movie, "Ready");
        ready.state = DownloadState::Completed;
        ready.playback = Some(PlaybackInfo {
            location: PathBuf::from("/media/ready.mp4"),
            ..Default::default()
        });
        let pending = Asset::new("m-2", AssetKind::Movie, "Pending");
        Arc::new(InMemoryAssetSource::with_assets(vec![ready, pending]))
    }

    #[test]
    fn test_delete_assets_continues_after_failure() {
        let source = source();
        source.fail_delete_of("m-1");
        let interactor = DownloadsInteractor::new(source.clone());

        let deleted = interactor.delete_assets(&["m-1", "m-2"]);

        assert_eq!(deleted, 1);
        assert_eq!(source.deleted(), vec!["m-1".to_string(), "m-2".to_string()]);
    }

    #[test]
    fn test_downloaded_asset_only_when_ready() {
        let interactor = DownloadsInteractor::new(source());
        assert!(interactor.downloaded_asset("m-1").is_some());
        assert!(interactor.downloaded_asset("m-2").is_none());
        assert!(interactor.downloaded_asset("nope").is_none());
    }

    #[tokio::test]
    async fn test_observe_forwards_events() {
        let source = source();
        let interactor = DownloadsInteractor::new(source.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = interactor.observe(move |event| {
            let _ = tx.send(event);
        });
        source.set_state("m-2", DownloadState::Downloading { progress: 0.1 });

        let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.asset_id, "m-2");
        handle.abort();
    }
}
