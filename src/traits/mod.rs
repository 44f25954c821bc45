//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`AssetSource`] - Downloaded asset storage and state events
//! - [`DisplaySurface`] - List widget driven by a table adapter
//! - [`TableDataSource`] - What a surface queries while laying out
//! - [`Navigator`] - Navigation to other screens and the player
//! - [`ScreenAnalytics`] - Screen-open reporting
//! - [`MediaLauncher`] - Browser and player hand-off

pub mod analytics;
pub mod asset_source;
pub mod launcher;
pub mod navigator;
pub mod surface;

pub use analytics::ScreenAnalytics;
pub use asset_source::AssetSource;
pub use launcher::MediaLauncher;
pub use navigator::{Destination, Navigator};
pub use surface::{
    DisplaySurface, ProviderId, RowAnimation, ScrollPosition, TableDataSource,
};
