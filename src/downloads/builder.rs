//! Builds the whole downloads list from assets.

use crate::models::{Asset, DownloadState};

use super::cell_builder::DownloadsCellViewModelBuilder;
use super::formatting::format_bytes;
use super::view_model::{
    DownloadItemViewModel, DownloadRow, DownloadsViewModel, SeriesHeaderViewModel,
};

/// What a downloads screen lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadsScope {
    /// Every movie, plus one row per series.
    #[default]
    All,
    /// The episodes of one series.
    Series { series_id: String, title: String },
}

impl DownloadsScope {
    /// Name reported to analytics when the screen opens.
    pub fn screen_name(&self) -> &'static str {
        match self {
            DownloadsScope::All => "DownloadsView",
            DownloadsScope::Series { .. } => "DownloadSeriesView",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            DownloadsScope::All => "Downloads",
            DownloadsScope::Series { title, .. } => title,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadsViewModelBuilder {
    cells: DownloadsCellViewModelBuilder,
}

impl DownloadsViewModelBuilder {
    pub fn new(cells: DownloadsCellViewModelBuilder) -> Self {
        Self { cells }
    }

    pub fn build(&self, assets: &[Asset], scope: &DownloadsScope) -> DownloadsViewModel {
        let items = self.cells.build(assets);
        let mut rows = Vec::with_capacity(items.len() + 1);
        if let DownloadsScope::Series { series_id, title } = scope {
            if !items.is_empty() {
                rows.push(DownloadRow::SeriesHeader(series_header(
                    series_id,
                    title,
                    assets,
                )));
            }
        }
        rows.extend(items.into_iter().map(DownloadRow::Item));
        DownloadsViewModel { rows }
    }

    pub fn updated_view_model(
        &self,
        cell: &DownloadItemViewModel,
        state: DownloadState,
    ) -> DownloadItemViewModel {
        self.cells.updated_view_model(cell, state)
    }

    /// Rebuild `cell` for a state event about `asset_id`, which may be the
    /// row's own asset or one of its episodes.
    pub fn updated_row(
        &self,
        cell: &DownloadItemViewModel,
        asset_id: &str,
        state: DownloadState,
    ) -> Option<DownloadItemViewModel> {
        if cell.asset.id == asset_id {
            Some(self.cells.updated_view_model(cell, state))
        } else {
            self.cells.updated_episode_state(cell, asset_id, state)
        }
    }

    /// Header for the episodes remaining in `rows`.
    pub fn header_for_items<'a>(
        &self,
        series_id: &str,
        title: &str,
        items: impl Iterator<Item = &'a DownloadItemViewModel>,
    ) -> SeriesHeaderViewModel {
        let (count, bytes) = items.fold((0, 0u64), |(count, bytes), item| {
            (count + 1, bytes + item.asset.byte_count)
        });
        SeriesHeaderViewModel {
            series_id: series_id.to_string(),
            title: title.to_string(),
            episode_count: count,
            total_size: format_bytes(bytes),
        }
    }
}

fn series_header(series_id: &str, title: &str, episodes: &[Asset]) -> SeriesHeaderViewModel {
    SeriesHeaderViewModel {
        series_id: series_id.to_string(),
        title: title.to_string(),
        episode_count: episodes.len(),
        total_size: format_bytes(episodes.iter().map(|e| e.byte_count).sum()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetKind;
    use crate::table::RowModel;
    use crate::downloads::view_model::DownloadRowKind;

    fn episode(id: &str, number: u32, bytes: u64) -> Asset {
        let mut asset = Asset::new(id, AssetKind::Episode, "");
        asset.episode_number = Some(number);
        asset.byte_count = bytes;
        asset
    }

    #[test]
    fn test_all_scope_has_only_items() {
        let builder = DownloadsViewModelBuilder::default();
        let assets = vec![
            Asset::new("m-1", AssetKind::Movie, "One"),
            Asset::new("m-2", AssetKind::Movie, "Two"),
        ];
        let vm = builder.build(&assets, &DownloadsScope::All);

        assert_eq!(vm.rows.len(), 2);
        assert!(vm.rows.iter().all(|r| r.kind() == DownloadRowKind::Item));
        assert_eq!(vm.item_count(), 2);
    }

    #[test]
    fn test_series_scope_leads_with_header() {
        let builder = DownloadsViewModelBuilder::default();
        let scope = DownloadsScope::Series {
            series_id: "s-1".to_string(),
            title: "Dark".to_string(),
        };
        let assets = vec![episode("e-1", 1, 1024), episode("e-2", 2, 1024)];
        let vm = builder.build(&assets, &scope);

        assert_eq!(vm.rows.len(), 3);
        match &vm.rows[0] {
            DownloadRow::SeriesHeader(header) => {
                assert_eq!(header.title, "Dark");
                assert_eq!(header.episode_count, 2);
                assert_eq!(header.total_size, "2 KB");
            }
            other => panic!("expected header, got {:?}", other),
        }
        assert_eq!(vm.rows[1].as_item().unwrap().item.title, "Episode 1");
    }

    #[test]
    fn test_series_scope_without_episodes_is_empty() {
        let builder = DownloadsViewModelBuilder::default();
        let scope = DownloadsScope::Series {
            series_id: "s-1".to_string(),
            title: "Dark".to_string(),
        };
        let vm = builder.build(&[], &scope);
        assert!(vm.rows.is_empty());
        assert!(vm.is_empty());
    }

    #[test]
    fn test_updated_row_matches_own_id_or_episode() {
        let builder = DownloadsViewModelBuilder::default();
        let mut series = Asset::new("s-1", AssetKind::Series, "Dark");
        series.episodes = vec![episode("e-1", 1, 10)];
        let vm = builder.build(&[series], &DownloadsScope::All);
        let row = vm.rows[0].as_item().unwrap();

        assert!(builder
            .updated_row(row, "e-1", DownloadState::Completed)
            .is_some());
        assert!(builder
            .updated_row(row, "s-1", DownloadState::Queued)
            .is_some());
        assert!(builder
            .updated_row(row, "zzz", DownloadState::Queued)
            .is_none());
    }

    #[test]
    fn test_screen_names() {
        assert_eq!(DownloadsScope::All.screen_name(), "DownloadsView");
        let scope = DownloadsScope::Series {
            series_id: "s".to_string(),
            title: "T".to_string(),
        };
        assert_eq!(scope.screen_name(), "DownloadSeriesView");
        assert_eq!(scope.title(), "T");
    }
}
