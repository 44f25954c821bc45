//! Common test utilities for integration tests.
//!
//! Asset fixtures, a test [`App`] wired to recording doubles, and helpers
//! for driving the message loop by hand.
//!
//! # Example
//!
//! ```ignore
//! let harness = TestApp::with_assets(sample_library());
//! let mut app = harness.app;
//! app.start(DownloadsScope::All);
//! pump(&mut app, &mut harness.rx).await;
//! ```

#![allow(dead_code)]

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use reel::adapters::mock::{InMemoryAssetSource, RecordingAnalytics, RecordingLauncher};
use reel::app::{App, AppMessage};
use reel::config::Config;
use reel::models::{Asset, AssetKind, DownloadState, PlaybackInfo};
use tokio::sync::mpsc;

/// A completed movie with a media file, downloaded on `day` of March 2024.
pub fn movie(id: &str, title: &str, day: u32) -> Asset {
    let mut asset = Asset::new(id, AssetKind::Movie, title);
    asset.state = DownloadState::Completed;
    asset.byte_count = 1_500_000_000;
    asset.downloaded_at = Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).single();
    asset.playback = Some(PlaybackInfo {
        location: PathBuf::from(format!("/media/{}.mp4", id)),
        duration_secs: Some(7200),
        watch_position_secs: None,
    });
    asset
}

/// A completed episode of `series_id`.
pub fn episode(id: &str, series_id: &str, series_title: &str, number: u32, day: u32) -> Asset {
    let mut asset = movie(id, &format!("Episode {}", number), day);
    asset.kind = AssetKind::Episode;
    asset.series_id = Some(series_id.to_string());
    asset.series_title = Some(series_title.to_string());
    asset.season_number = Some(1);
    asset.episode_number = Some(number);
    asset.byte_count = 700_000_000;
    asset
}

/// Two movies and a two-episode series, the series downloaded last.
pub fn sample_library() -> Vec<Asset> {
    vec![
        movie("m-arrival", "Arrival", 1),
        movie("m-dune", "Dune", 2),
        episode("e-1", "s-expanse", "The Expanse", 1, 3),
        episode("e-2", "s-expanse", "The Expanse", 2, 4),
    ]
}

/// An [`App`] over an in-memory store with recording doubles.
pub struct TestApp {
    pub app: App,
    pub rx: mpsc::UnboundedReceiver<AppMessage>,
    pub source: Arc<InMemoryAssetSource>,
    pub launcher: Rc<RecordingLauncher>,
    pub analytics: Rc<RecordingAnalytics>,
}

impl TestApp {
    pub fn with_assets(assets: Vec<Asset>) -> Self {
        let source = Arc::new(InMemoryAssetSource::with_assets(assets));
        let launcher = Rc::new(RecordingLauncher::new());
        let analytics = Rc::new(RecordingAnalytics::new());
        let mut app = App::new(
            &Config::default(),
            source.clone(),
            launcher.clone(),
            analytics.clone(),
        );
        let rx = app.message_rx.take().expect("fresh app has a receiver");
        Self {
            app,
            rx,
            source,
            launcher,
            analytics,
        }
    }
}

/// Wait for the next message and hand it to the app.
pub async fn pump(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppMessage>) -> AppMessage {
    let msg = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for an app message")
        .expect("message channel closed");
    app.handle_message(msg.clone());
    msg
}

/// Handle every message that arrives within `quiet`.
pub async fn drain(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppMessage>, quiet: Duration) {
    while let Ok(Some(msg)) = tokio::time::timeout(quiet, rx.recv()).await {
        app.handle_message(msg);
    }
}
