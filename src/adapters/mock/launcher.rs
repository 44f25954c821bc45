//! Recording launcher for testing.

use std::sync::Mutex;

use crate::error::{ReelResult, SystemError};
use crate::models::PlaybackDescriptor;
use crate::traits::MediaLauncher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    Url(String),
    Play(String),
}

/// Records launches instead of starting programs.
#[derive(Default)]
pub struct RecordingLauncher {
    launches: Mutex<Vec<Launch>>,
    should_fail: Mutex<bool>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every launch fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn launches(&self) -> Vec<Launch> {
        self.launches.lock().unwrap().clone()
    }

    fn record(&self, launch: Launch) -> ReelResult<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(SystemError::LaunchFailed {
                program: "mock".to_string(),
                message: "Mock launch failure".to_string(),
            }
            .into());
        }
        self.launches.lock().unwrap().push(launch);
        Ok(())
    }
}

impl MediaLauncher for RecordingLauncher {
    fn open_url(&self, url: &str) -> ReelResult<()> {
        self.record(Launch::Url(url.to_string()))
    }

    fn play(&self, descriptor: &PlaybackDescriptor) -> ReelResult<()> {
        self.record(Launch::Play(descriptor.asset_id.clone()))
    }
}
