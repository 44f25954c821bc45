//! Handing things off to other programs.

use crate::error::ReelResult;
use crate::models::PlaybackDescriptor;

pub trait MediaLauncher {
    /// Open `url` in the user's browser.
    fn open_url(&self, url: &str) -> ReelResult<()>;

    /// Start playback of a local asset.
    fn play(&self, descriptor: &PlaybackDescriptor) -> ReelResult<()>;
}
