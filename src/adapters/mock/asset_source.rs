//! In-memory asset source for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::error::{ReelResult, StoreError};
use crate::models::{episodes_of, group_by_series, Asset, DownloadState, DownloadStateEvent};
use crate::traits::AssetSource;

/// Asset source backed by a vector, with switchable failures.
///
/// Holds assets the way the manifest does: movies and episodes, flat.
/// Series are synthesized on read exactly as the file store does.
pub struct InMemoryAssetSource {
    assets: Mutex<Vec<Asset>>,
    events: broadcast::Sender<DownloadStateEvent>,
    deleted: Mutex<Vec<String>>,
    failing_deletes: Mutex<HashSet<String>>,
    load_should_fail: Mutex<bool>,
    loads: AtomicUsize,
}

impl InMemoryAssetSource {
    pub fn new() -> Self {
        Self::with_assets(Vec::new())
    }

    pub fn with_assets(assets: Vec<Asset>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            assets: Mutex::new(assets),
            events,
            deleted: Mutex::new(Vec::new()),
            failing_deletes: Mutex::new(HashSet::new()),
            load_should_fail: Mutex::new(false),
            loads: AtomicUsize::new(0),
        }
    }

    /// Configure whether listing should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Make deleting `asset_id` fail.
    pub fn fail_delete_of(&self, asset_id: impl Into<String>) {
        self.failing_deletes.lock().unwrap().insert(asset_id.into());
    }

    /// Ids passed to `delete`, in call order, including failed ones.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    /// Number of `all_assets`/`episode_assets` calls.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn assets(&self) -> Vec<Asset> {
        self.assets.lock().unwrap().clone()
    }

    pub fn replace_assets(&self, assets: Vec<Asset>) {
        *self.assets.lock().unwrap() = assets;
    }

    /// Update a stored state and broadcast the change.
    pub fn set_state(&self, asset_id: &str, state: DownloadState) {
        if let Some(asset) = self
            .assets
            .lock()
            .unwrap()
            .iter_mut()
            .find(|a| a.id == asset_id)
        {
            asset.state = state.clone();
        }
        let _ = self.events.send(DownloadStateEvent::new(asset_id, state));
    }

    fn check_load(&self) -> ReelResult<()> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if *self.load_should_fail.lock().unwrap() {
            return Err(StoreError::ManifestUnreadable {
                path: "memory".into(),
                message: "Mock load failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for InMemoryAssetSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for InMemoryAssetSource {
    fn all_assets(&self) -> ReelResult<Vec<Asset>> {
        self.check_load()?;
        Ok(group_by_series(self.assets()))
    }

    fn episode_assets(&self, series_id: &str) -> ReelResult<Vec<Asset>> {
        self.check_load()?;
        Ok(episodes_of(&self.assets.lock().unwrap(), series_id))
    }

    fn delete(&self, asset_id: &str) -> ReelResult<()> {
        self.deleted.lock().unwrap().push(asset_id.to_string());
        if self.failing_deletes.lock().unwrap().contains(asset_id) {
            return Err(StoreError::AssetNotFound {
                asset_id: asset_id.to_string(),
            }
            .into());
        }
        self.assets
            .lock()
            .unwrap()
            .retain(|a| a.id != asset_id && a.series_id.as_deref() != Some(asset_id));
        Ok(())
    }

    fn ready_to_play(&self, asset_id: &str) -> Option<Asset> {
        self.assets
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == asset_id && a.is_ready_to_play())
            .cloned()
    }

    fn subscribe(&self) -> broadcast::Receiver<DownloadStateEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetKind;

    #[test]
    fn test_delete_records_and_removes() {
        let source = InMemoryAssetSource::with_assets(vec![
            Asset::new("m-1", AssetKind::Movie, "One"),
            Asset::new("m-2", AssetKind::Movie, "Two"),
        ]);
        source.delete("m-1").unwrap();

        assert_eq!(source.deleted(), vec!["m-1".to_string()]);
        assert_eq!(source.all_assets().unwrap().len(), 1);
    }

    #[test]
    fn test_failures_are_switchable() {
        let source = InMemoryAssetSource::new();
        source.set_load_should_fail(true);
        assert!(source.all_assets().is_err());
        source.set_load_should_fail(false);
        assert!(source.all_assets().is_ok());
        assert_eq!(source.load_count(), 2);

        source.fail_delete_of("x");
        assert!(source.delete("x").is_err());
        assert_eq!(source.deleted(), vec!["x".to_string()]);
    }

    #[test]
    fn test_set_state_broadcasts() {
        let source = InMemoryAssetSource::with_assets(vec![Asset::new(
            "m-1",
            AssetKind::Movie,
            "One",
        )]);
        let mut rx = source.subscribe();
        source.set_state("m-1", DownloadState::Completed);

        let event = rx.try_recv().unwrap();
        assert_eq!(event, DownloadStateEvent::new("m-1", DownloadState::Completed));
        assert_eq!(source.assets()[0].state, DownloadState::Completed);
    }
}
