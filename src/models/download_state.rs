use serde::{Deserialize, Serialize};

/// Download lifecycle of one asset, as written by the downloader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadState {
    #[default]
    Queued,
    /// `progress` is a fraction in `0.0..=1.0`
    Downloading { progress: f32 },
    Paused { progress: f32 },
    Completed,
    Failed { reason: String },
}

impl DownloadState {
    pub fn is_completed(&self) -> bool {
        matches!(self, DownloadState::Completed)
    }

    /// Fraction downloaded, if meaningful for this state.
    pub fn progress(&self) -> Option<f32> {
        match self {
            DownloadState::Downloading { progress } | DownloadState::Paused { progress } => {
                Some(progress.clamp(0.0, 1.0))
            }
            DownloadState::Completed => Some(1.0),
            DownloadState::Queued | DownloadState::Failed { .. } => None,
        }
    }

    /// Whole percent. Only a completed download reads as 100.
    pub fn percent(&self) -> Option<u8> {
        match self {
            DownloadState::Completed => Some(100),
            _ => self.progress().map(|p| ((p * 100.0).round() as u8).min(99)),
        }
    }

    /// Combined state of a series from its episodes' states.
    ///
    /// Any active download wins, then anything queued, then paused; a
    /// series is only completed when every episode is.
    pub fn aggregate<'a>(states: impl IntoIterator<Item = &'a DownloadState>) -> DownloadState {
        let states: Vec<&DownloadState> = states.into_iter().collect();
        if states.is_empty() || states.iter().all(|s| s.is_completed()) {
            return DownloadState::Completed;
        }

        let mean = || {
            let total: f32 = states.iter().map(|s| s.progress().unwrap_or(0.0)).sum();
            total / states.len() as f32
        };

        if states
            .iter()
            .any(|s| matches!(s, DownloadState::Downloading { .. }))
        {
            return DownloadState::Downloading { progress: mean() };
        }
        if states.iter().any(|s| matches!(s, DownloadState::Queued)) {
            return DownloadState::Queued;
        }
        if states
            .iter()
            .any(|s| matches!(s, DownloadState::Paused { .. }))
        {
            return DownloadState::Paused { progress: mean() };
        }
        states
            .into_iter()
            .find_map(|s| match s {
                DownloadState::Failed { reason } => Some(DownloadState::Failed {
                    reason: reason.clone(),
                }),
                _ => None,
            })
            .unwrap_or(DownloadState::Completed)
    }
}

/// A state change for one asset, broadcast by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadStateEvent {
    pub asset_id: String,
    pub state: DownloadState,
}

impl DownloadStateEvent {
    pub fn new(asset_id: impl Into<String>, state: DownloadState) -> Self {
        Self {
            asset_id: asset_id.into(),
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_serde_tagging() {
        let state: DownloadState =
            serde_json::from_str(r#"{"status": "downloading", "progress": 0.42}"#).unwrap();
        assert_eq!(state, DownloadState::Downloading { progress: 0.42 });

        let json = serde_json::to_string(&DownloadState::Failed {
            reason: "disk full".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"failed","reason":"disk full"}"#);
    }

    #[test]
    fn test_percent() {
        assert_eq!(DownloadState::Downloading { progress: 0.42 }.percent(), Some(42));
        assert_eq!(DownloadState::Downloading { progress: 0.0 }.percent(), Some(0));
        assert_eq!(DownloadState::Paused { progress: 0.996 }.percent(), Some(99));
        assert_eq!(DownloadState::Completed.percent(), Some(100));
        assert_eq!(DownloadState::Queued.percent(), None);
    }

    #[test]
    fn test_aggregate_all_completed() {
        let states = [DownloadState::Completed, DownloadState::Completed];
        assert_eq!(DownloadState::aggregate(&states), DownloadState::Completed);
    }

    #[test]
    fn test_aggregate_downloading_averages() {
        let states = [
            DownloadState::Completed,
            DownloadState::Downloading { progress: 0.5 },
        ];
        assert_eq!(
            DownloadState::aggregate(&states),
            DownloadState::Downloading { progress: 0.75 }
        );
    }

    #[test]
    fn test_aggregate_failed_only_when_nothing_else_pending() {
        let states = [
            DownloadState::Completed,
            DownloadState::Failed {
                reason: "network".to_string(),
            },
        ];
        assert_eq!(
            DownloadState::aggregate(&states),
            DownloadState::Failed {
                reason: "network".to_string()
            }
        );

        let states = [
            DownloadState::Queued,
            DownloadState::Failed {
                reason: "network".to_string(),
            },
        ];
        assert_eq!(DownloadState::aggregate(&states), DownloadState::Queued);
    }
}
