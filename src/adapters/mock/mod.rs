//! Mock implementations for testing.
//!
//! This module provides mock implementations of all trait abstractions,
//! enabling unit testing without a terminal or file system access.
//!
//! # Available Mocks
//!
//! - [`InMemoryAssetSource`] - Asset source with switchable failures
//! - [`RecordingSurface`] - Display surface that records adapter calls
//! - [`RecordingNavigator`] - Navigator that records destinations
//! - [`RecordingAnalytics`] - Analytics sink that records screen names
//! - [`RecordingLauncher`] - Launcher that records URLs and playback requests

pub mod analytics;
pub mod asset_source;
pub mod launcher;
pub mod navigator;
pub mod surface;

pub use analytics::RecordingAnalytics;
pub use asset_source::InMemoryAssetSource;
pub use launcher::{Launch, RecordingLauncher};
pub use navigator::RecordingNavigator;
pub use surface::{RecordingSurface, SurfaceCall};
