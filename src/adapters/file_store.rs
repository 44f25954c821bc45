//! Downloads manifest on disk.
//!
//! The external downloader records every asset in
//! `<data_dir>/downloads.json`:
//!
//! ```json
//! { "version": 1, "assets": [ { "id": "m-1", "kind": "movie", ... } ] }
//! ```
//!
//! Only movies and episodes are persisted. Series are synthesized on read by
//! grouping episodes on `series_id`. Writes go to a temp file in the same
//! directory and are renamed over the manifest.
//!
//! A manifest that cannot be read (mid-write, damaged) does not stop the
//! store from opening. The failure is reported by the next listing, and
//! every listing re-reads the file until a read succeeds.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{classify_io_error, ReelResult, StoreError};
use crate::models::{episodes_of, group_by_series, Asset, DownloadStateEvent};
use crate::traits::AssetSource;

pub const MANIFEST_FILE: &str = "downloads.json";
pub const MANIFEST_VERSION: u32 = 1;

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    assets: Vec<Asset>,
}

fn default_version() -> u32 {
    MANIFEST_VERSION
}

/// What changed between two reads of the manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestDiff {
    /// State changes of assets present in both reads
    pub changed: Vec<DownloadStateEvent>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ManifestDiff {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }

    /// Assets appeared or disappeared, so lists need a full reload.
    pub fn is_structural(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

pub struct FileAssetStore {
    data_dir: PathBuf,
    manifest_path: PathBuf,
    assets: RwLock<Vec<Asset>>,
    /// The last manifest read failed; listings must re-read before answering
    read_failed: AtomicBool,
    events: broadcast::Sender<DownloadStateEvent>,
}

impl FileAssetStore {
    /// Open the store in `data_dir`, creating the directory if needed.
    /// A missing manifest is an empty store; an unreadable one is retried by
    /// the next listing.
    pub fn open(data_dir: impl Into<PathBuf>) -> ReelResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .map_err(|e| classify_io_error(e, Some(data_dir.clone()), "create data directory"))?;
        let manifest_path = data_dir.join(MANIFEST_FILE);
        let (assets, read_failed) = match read_manifest(&manifest_path) {
            Ok(assets) => {
                info!(
                    path = %manifest_path.display(),
                    assets = assets.len(),
                    "opened downloads manifest"
                );
                (assets, false)
            }
            Err(e) => {
                warn!(path = %manifest_path.display(), "{}", e);
                (Vec::new(), true)
            }
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            data_dir,
            manifest_path,
            assets: RwLock::new(assets),
            read_failed: AtomicBool::new(read_failed),
            events,
        })
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Re-read the manifest and broadcast state changes.
    ///
    /// On failure the previous contents stay in place.
    pub fn reload_from_disk(&self) -> ReelResult<ManifestDiff> {
        let fresh = match read_manifest(&self.manifest_path) {
            Ok(fresh) => fresh,
            Err(e) => {
                self.read_failed.store(true, Ordering::SeqCst);
                return Err(e.into());
            }
        };
        self.read_failed.store(false, Ordering::SeqCst);
        let diff = {
            let mut assets = self.assets.write().unwrap_or_else(PoisonError::into_inner);
            let diff = diff_assets(&assets, &fresh);
            *assets = fresh;
            diff
        };
        for event in &diff.changed {
            let _ = self.events.send(event.clone());
        }
        if !diff.is_empty() {
            info!(
                changed = diff.changed.len(),
                added = diff.added.len(),
                removed = diff.removed.len(),
                "downloads manifest changed on disk"
            );
        }
        Ok(diff)
    }

    /// Re-read the manifest if the last read failed, surfacing the error.
    fn ensure_readable(&self) -> ReelResult<()> {
        if self.read_failed.load(Ordering::SeqCst) {
            self.reload_from_disk()?;
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    fn write_manifest(&self, assets: &[Asset]) -> Result<(), StoreError> {
        let tmp_path = self
            .data_dir
            .join(format!("{}.{}.tmp", MANIFEST_FILE, Uuid::new_v4()));
        let manifest = Manifest {
            version: MANIFEST_VERSION,
            assets: assets.to_vec(),
        };
        let result = write_atomically(&tmp_path, &self.manifest_path, &manifest);
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn remove_file_if_present(&self, path: &Path) -> Result<(), StoreError> {
        let path = self.resolve(path);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed downloaded file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::MediaRemovalFailed {
                path,
                message: e.to_string(),
            }),
        }
    }
}

impl AssetSource for FileAssetStore {
    fn all_assets(&self) -> ReelResult<Vec<Asset>> {
        self.ensure_readable()?;
        let assets = self.assets.read().unwrap_or_else(PoisonError::into_inner);
        Ok(group_by_series(assets.clone()))
    }

    fn episode_assets(&self, series_id: &str) -> ReelResult<Vec<Asset>> {
        self.ensure_readable()?;
        let assets = self.assets.read().unwrap_or_else(PoisonError::into_inner);
        Ok(episodes_of(&assets, series_id))
    }

    /// Remove `asset_id` (or every episode of the series `asset_id`) from the
    /// manifest and delete its files.
    fn delete(&self, asset_id: &str) -> ReelResult<()> {
        let removed = {
            let mut assets = self.assets.write().unwrap_or_else(PoisonError::into_inner);
            let (removed, kept): (Vec<Asset>, Vec<Asset>) = assets.drain(..).partition(|a| {
                a.id == asset_id || a.series_id.as_deref() == Some(asset_id)
            });
            if removed.is_empty() {
                *assets = kept;
                return Err(StoreError::AssetNotFound {
                    asset_id: asset_id.to_string(),
                }
                .into());
            }
            if let Err(e) = self.write_manifest(&kept) {
                let mut restored = kept;
                restored.extend(removed);
                *assets = restored;
                return Err(e.into());
            }
            *assets = kept;
            removed
        };

        let mut first_failure = None;
        for asset in &removed {
            if !asset.state.is_completed() {
                info!(asset_id = %asset.id, "cancelled unfinished download");
            }
            let files = asset
                .playback
                .iter()
                .map(|p| p.location.as_path())
                .chain(asset.poster_path.as_deref());
            for path in files {
                if let Err(e) = self.remove_file_if_present(path) {
                    warn!(asset_id = %asset.id, "{}", e);
                    first_failure.get_or_insert(e);
                }
            }
        }
        info!(asset_id, removed = removed.len(), "deleted download");
        match first_failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn ready_to_play(&self, asset_id: &str) -> Option<Asset> {
        let assets = self.assets.read().unwrap_or_else(PoisonError::into_inner);
        let mut asset = assets
            .iter()
            .find(|a| a.id == asset_id && a.is_ready_to_play())?
            .clone();
        let playback = asset.playback.as_mut()?;
        playback.location = self.resolve(&playback.location);
        if !playback.location.exists() {
            warn!(asset_id, path = %playback.location.display(), "media file missing");
            return None;
        }
        Some(asset)
    }

    fn subscribe(&self) -> broadcast::Receiver<DownloadStateEvent> {
        self.events.subscribe()
    }
}

impl std::fmt::Debug for FileAssetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileAssetStore")
            .field("manifest_path", &self.manifest_path)
            .finish_non_exhaustive()
    }
}

fn write_atomically(tmp_path: &Path, target: &Path, manifest: &Manifest) -> Result<(), StoreError> {
    let file = File::create(tmp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, manifest).map_err(|e| StoreError::Serialization {
        message: e.to_string(),
    })?;
    writer.flush()?;
    drop(writer);
    fs::rename(tmp_path, target)?;
    Ok(())
}

fn read_manifest(path: &Path) -> Result<Vec<Asset>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StoreError::ManifestUnreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    };
    let manifest: Manifest =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::ManifestCorrupt {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if manifest.version > MANIFEST_VERSION {
        warn!(
            version = manifest.version,
            supported = MANIFEST_VERSION,
            "downloads manifest is newer than this build"
        );
    }
    Ok(manifest.assets)
}

fn diff_assets(old: &[Asset], new: &[Asset]) -> ManifestDiff {
    let previous: HashMap<&str, &Asset> = old.iter().map(|a| (a.id.as_str(), a)).collect();
    let mut diff = ManifestDiff::default();
    for asset in new {
        match previous.get(asset.id.as_str()) {
            Some(before) if before.state != asset.state => diff
                .changed
                .push(DownloadStateEvent::new(asset.id.clone(), asset.state.clone())),
            Some(_) => {}
            None => diff.added.push(asset.id.clone()),
        }
    }
    let current: HashMap<&str, ()> = new.iter().map(|a| (a.id.as_str(), ())).collect();
    diff.removed = old
        .iter()
        .filter(|a| !current.contains_key(a.id.as_str()))
        .map(|a| a.id.clone())
        .collect();
    diff
}
