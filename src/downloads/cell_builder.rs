//! Maps assets to download item view-models.

use crate::models::{Asset, DownloadState};

use super::formatting::{
    episode_title, format_duration, format_release_date, status_line,
};
use super::view_model::{AssetInfoViewModel, DownloadItemViewModel, EpisodeItemViewModel};

#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadsCellViewModelBuilder;

impl DownloadsCellViewModelBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, assets: &[Asset]) -> Vec<DownloadItemViewModel> {
        assets.iter().map(|asset| self.make_cell(asset)).collect()
    }

    /// The same row for a new state. Asset data is kept as is.
    pub fn updated_view_model(
        &self,
        cell: &DownloadItemViewModel,
        state: DownloadState,
    ) -> DownloadItemViewModel {
        DownloadItemViewModel {
            item: self.make_item(&cell.asset, &state),
            asset: cell.asset.clone(),
            state,
        }
    }

    /// A series row after one of its episodes changed state.
    ///
    /// Returns `None` when `episode_id` is not an episode of the row.
    pub fn updated_episode_state(
        &self,
        cell: &DownloadItemViewModel,
        episode_id: &str,
        state: DownloadState,
    ) -> Option<DownloadItemViewModel> {
        let mut asset = cell.asset.clone();
        let episode = asset.episodes.iter_mut().find(|e| e.id == episode_id)?;
        episode.state = state;
        let aggregate = DownloadState::aggregate(asset.episodes.iter().map(|e| &e.state));
        asset.state = aggregate.clone();
        Some(DownloadItemViewModel {
            item: self.make_item(&asset, &aggregate),
            asset,
            state: aggregate,
        })
    }

    fn make_cell(&self, asset: &Asset) -> DownloadItemViewModel {
        let info = make_asset_info(asset);
        DownloadItemViewModel {
            item: self.make_item(&info, &asset.state),
            asset: info,
            state: asset.state.clone(),
        }
    }

    fn make_item(&self, asset: &AssetInfoViewModel, state: &DownloadState) -> EpisodeItemViewModel {
        let second_title = match (&asset.original_title, asset.is_series) {
            (Some(original), _) if !original.is_empty() => Some(original.clone()),
            (_, true) => Some(episode_count(asset.episodes.len())),
            _ => asset.duration.clone(),
        };
        EpisodeItemViewModel {
            title: episode_title(&asset.title, asset.episode_number),
            second_title,
            third_title: status_line(state),
            release_date: asset.release_date.map(format_release_date),
        }
    }
}

fn make_asset_info(asset: &Asset) -> AssetInfoViewModel {
    let playback = asset.playback.as_ref();
    AssetInfoViewModel {
        id: asset.id.clone(),
        is_series: asset.is_series(),
        title: asset.title.clone(),
        original_title: asset.original_title.clone(),
        poster_url: asset.poster_url.clone(),
        poster_path: asset.poster_path.clone(),
        episode_number: asset.episode_number,
        season_number: asset.season_number,
        series_id: asset.series_id.clone(),
        episodes: asset.episodes.iter().map(make_asset_info).collect(),
        location: playback.map(|p| p.location.clone()),
        byte_count: asset.total_byte_count(),
        watch_progress: playback.map_or(0.0, |p| p.watch_progress()),
        duration: format_duration(playback.and_then(|p| p.duration_secs)),
        release_date: asset.release_date,
        state: asset.state.clone(),
    }
}

fn episode_count(count: usize) -> String {
    match count {
        1 => "1 episode".to_string(),
        n => format!("{} episodes", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetKind, PlaybackInfo};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn episode(id: &str, number: u32, state: DownloadState) -> Asset {
        let mut asset = Asset::new(id, AssetKind::Episode, format!("Part {}", number));
        asset.episode_number = Some(number);
        asset.series_id = Some("s-1".to_string());
        asset.state = state;
        asset
    }

    #[test]
    fn test_build_movie_row() {
        let mut movie = Asset::new("m-1", AssetKind::Movie, "Arrival");
        movie.original_title = Some("Story of Your Life".to_string());
        movie.release_date = NaiveDate::from_ymd_opt(2016, 11, 11);
        movie.state = DownloadState::Downloading { progress: 0.42 };
        movie.playback = Some(PlaybackInfo {
            location: PathBuf::from("/media/arrival.mp4"),
            duration_secs: Some(6960),
            watch_position_secs: None,
        });

        let rows = DownloadsCellViewModelBuilder::new().build(&[movie]);
        let row = &rows[0];

        assert_eq!(row.item.title, "Arrival");
        assert_eq!(row.item.second_title.as_deref(), Some("Story of Your Life"));
        assert_eq!(row.item.third_title, "Downloading 42%");
        assert_eq!(row.item.release_date.as_deref(), Some("11 Nov 2016"));
        assert_eq!(row.asset.duration.as_deref(), Some("1 h 56 min"));
        assert_eq!(row.asset.location, Some(PathBuf::from("/media/arrival.mp4")));
    }

    #[test]
    fn test_build_numbers_episodes() {
        let rows = DownloadsCellViewModelBuilder::new()
            .build(&[episode("e-1", 3, DownloadState::Completed)]);
        assert_eq!(rows[0].item.title, "3. Part 3");
        assert_eq!(rows[0].item.third_title, "Downloaded");
    }

    #[test]
    fn test_series_row_counts_episodes() {
        let mut series = Asset::new("s-1", AssetKind::Series, "Dark");
        series.episodes = vec![
            episode("e-1", 1, DownloadState::Completed),
            episode("e-2", 2, DownloadState::Completed),
        ];
        series.state = DownloadState::Completed;

        let rows = DownloadsCellViewModelBuilder::new().build(&[series]);
        assert!(rows[0].asset.is_series);
        assert_eq!(rows[0].item.second_title.as_deref(), Some("2 episodes"));
        assert_eq!(rows[0].asset.episodes.len(), 2);
    }

    #[test]
    fn test_updated_view_model_keeps_asset() {
        let builder = DownloadsCellViewModelBuilder::new();
        let rows = builder.build(&[episode("e-1", 1, DownloadState::Queued)]);

        let updated = builder.updated_view_model(&rows[0], DownloadState::Paused { progress: 0.5 });

        assert_eq!(updated.asset, rows[0].asset);
        assert_eq!(updated.item.title, rows[0].item.title);
        assert_eq!(updated.item.third_title, "Paused at 50%");
        assert_eq!(updated.state, DownloadState::Paused { progress: 0.5 });
    }

    #[test]
    fn test_updated_episode_state_reaggregates_series() {
        let builder = DownloadsCellViewModelBuilder::new();
        let mut series = Asset::new("s-1", AssetKind::Series, "Dark");
        series.episodes = vec![
            episode("e-1", 1, DownloadState::Completed),
            episode("e-2", 2, DownloadState::Downloading { progress: 0.5 }),
        ];
        series.state = DownloadState::Downloading { progress: 0.75 };
        let rows = builder.build(&[series]);

        let updated = builder
            .updated_episode_state(&rows[0], "e-2", DownloadState::Completed)
            .unwrap();
        assert_eq!(updated.state, DownloadState::Completed);
        assert_eq!(updated.item.third_title, "Downloaded");

        assert!(builder
            .updated_episode_state(&rows[0], "e-9", DownloadState::Completed)
            .is_none());
    }
}
