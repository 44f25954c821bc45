//! Concrete implementations of trait abstractions.
//!
//! These adapters implement the traits defined in `crate::traits` against
//! the file system, the OS and the app loop.
//!
//! # Adapters
//!
//! - [`FileAssetStore`] - Downloads manifest in the data directory
//! - [`ManifestWatcher`] - Posts `ManifestChanged` when the manifest is rewritten
//! - [`ChannelNavigator`] - Routes navigation through the app message channel
//! - [`SystemLauncher`] - Opens the browser and the media player
//! - [`TracingAnalytics`] - Screen analytics as log events
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::InMemoryAssetSource`] - Asset source with switchable failures
//! - [`mock::RecordingSurface`] - Display surface that records adapter calls
//! - [`mock::RecordingNavigator`] / [`mock::RecordingAnalytics`] /
//!   [`mock::RecordingLauncher`] - Record what they were asked to do

pub mod channel_navigator;
pub mod file_store;
pub mod manifest_watcher;
pub mod mock;
pub mod system_launcher;
pub mod tracing_analytics;

pub use channel_navigator::ChannelNavigator;
pub use file_store::{FileAssetStore, ManifestDiff, MANIFEST_FILE};
pub use manifest_watcher::{ManifestWatcher, DEFAULT_DEBOUNCE};
pub use mock::{InMemoryAssetSource, RecordingAnalytics, RecordingNavigator, RecordingSurface};
pub use system_launcher::SystemLauncher;
pub use tracing_analytics::TracingAnalytics;
