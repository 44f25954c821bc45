//! Navigation out of a screen.

use crate::models::PlaybackDescriptor;

/// Where a screen can send the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The storefront, offered when there is nothing downloaded.
    Showcase,
    SeriesDetail { series_id: String, title: String },
    Player(PlaybackDescriptor),
}

pub trait Navigator {
    fn navigate(&self, destination: Destination);
}
