//! Launches the browser and the media player.

use std::process::{Command, Stdio};

use tracing::info;

use crate::error::{ReelResult, SystemError};
use crate::models::PlaybackDescriptor;
use crate::traits::MediaLauncher;

/// Uses the OS default handlers, or `player_command` for playback.
///
/// `player_command` is split on whitespace; the media path is appended as
/// the last argument, e.g. `"mpv --fs"` runs `mpv --fs /path/movie.mp4`.
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher {
    player_command: Option<String>,
}

impl SystemLauncher {
    pub fn new(player_command: Option<String>) -> Self {
        Self {
            player_command: player_command.filter(|c| !c.trim().is_empty()),
        }
    }

    /// Program and arguments used to play `descriptor`, when a player
    /// command is configured.
    pub fn player_invocation(&self, descriptor: &PlaybackDescriptor) -> Option<(String, Vec<String>)> {
        let command = self.player_command.as_deref()?;
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        let mut args: Vec<String> = parts.collect();
        args.push(descriptor.location.to_string_lossy().into_owned());
        Some((program, args))
    }
}

impl MediaLauncher for SystemLauncher {
    fn open_url(&self, url: &str) -> ReelResult<()> {
        open::that_detached(url).map_err(|e| SystemError::LaunchFailed {
            program: "browser".to_string(),
            message: e.to_string(),
        })?;
        info!(url, "opened url");
        Ok(())
    }

    fn play(&self, descriptor: &PlaybackDescriptor) -> ReelResult<()> {
        match self.player_invocation(descriptor) {
            Some((program, args)) => {
                Command::new(&program)
                    .args(&args)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .map_err(|e| SystemError::LaunchFailed {
                        program: program.clone(),
                        message: e.to_string(),
                    })?;
                info!(asset_id = %descriptor.asset_id, %program, "started player");
            }
            None => {
                open::that_detached(&descriptor.location).map_err(|e| {
                    SystemError::LaunchFailed {
                        program: "default player".to_string(),
                        message: e.to_string(),
                    }
                })?;
                info!(asset_id = %descriptor.asset_id, "opened media with default handler");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OFFLINE_SOURCE;
    use std::path::PathBuf;

    fn descriptor() -> PlaybackDescriptor {
        PlaybackDescriptor {
            asset_id: "m-1".to_string(),
            title: "Arrival".to_string(),
            location: PathBuf::from("/media/arrival.mp4"),
            resume_position_secs: 0,
            duration_secs: None,
            source: OFFLINE_SOURCE,
        }
    }

    #[test]
    fn test_player_invocation_appends_location() {
        let launcher = SystemLauncher::new(Some("mpv --fs".to_string()));
        let (program, args) = launcher.player_invocation(&descriptor()).unwrap();
        assert_eq!(program, "mpv");
        assert_eq!(args, vec!["--fs".to_string(), "/media/arrival.mp4".to_string()]);
    }

    #[test]
    fn test_blank_player_command_uses_default_handler() {
        let launcher = SystemLauncher::new(Some("   ".to_string()));
        assert!(launcher.player_invocation(&descriptor()).is_none());
    }
}
