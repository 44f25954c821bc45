//! Row view-models for the downloads list.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::models::DownloadState;
use crate::table::{RowModel, RowVariant};

/// Asset data a row keeps so it can be rebuilt for a new state.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetInfoViewModel {
    pub id: String,
    pub is_series: bool,
    pub title: String,
    pub original_title: Option<String>,
    pub poster_url: Option<String>,
    pub poster_path: Option<PathBuf>,
    pub episode_number: Option<u32>,
    pub season_number: Option<u32>,
    pub series_id: Option<String>,
    pub episodes: Vec<AssetInfoViewModel>,
    pub location: Option<PathBuf>,
    pub byte_count: u64,
    /// Watched fraction, 0.0..=1.0
    pub watch_progress: f32,
    pub duration: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// State when the row was built; kept current for episodes of a series
    pub state: DownloadState,
}

/// The three text lines of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeItemViewModel {
    pub title: String,
    pub second_title: Option<String>,
    /// Status line
    pub third_title: String,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadItemViewModel {
    pub item: EpisodeItemViewModel,
    pub asset: AssetInfoViewModel,
    pub state: DownloadState,
}

impl DownloadItemViewModel {
    pub fn asset_id(&self) -> &str {
        &self.asset.id
    }

    /// Whether `asset_id` is this row's asset or one of its episodes.
    pub fn covers(&self, asset_id: &str) -> bool {
        self.asset.id == asset_id || self.asset.episodes.iter().any(|e| e.id == asset_id)
    }
}

/// Heading shown above the episodes of one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesHeaderViewModel {
    pub series_id: String,
    pub title: String,
    pub episode_count: usize,
    pub total_size: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadRow {
    Item(DownloadItemViewModel),
    SeriesHeader(SeriesHeaderViewModel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadRowKind {
    Item,
    SeriesHeader,
}

impl DownloadRow {
    pub fn as_item(&self) -> Option<&DownloadItemViewModel> {
        match self {
            DownloadRow::Item(item) => Some(item),
            DownloadRow::SeriesHeader(_) => None,
        }
    }

    pub fn is_item(&self) -> bool {
        self.as_item().is_some()
    }
}

impl RowModel for DownloadRow {
    type Kind = DownloadRowKind;

    fn kind(&self) -> DownloadRowKind {
        match self {
            DownloadRow::Item(_) => DownloadRowKind::Item,
            DownloadRow::SeriesHeader(_) => DownloadRowKind::SeriesHeader,
        }
    }
}

impl RowVariant<DownloadRow> for DownloadItemViewModel {
    fn kind() -> DownloadRowKind {
        DownloadRowKind::Item
    }

    fn project(row: &DownloadRow) -> Option<&Self> {
        row.as_item()
    }
}

impl RowVariant<DownloadRow> for SeriesHeaderViewModel {
    fn kind() -> DownloadRowKind {
        DownloadRowKind::SeriesHeader
    }

    fn project(row: &DownloadRow) -> Option<&Self> {
        match row {
            DownloadRow::SeriesHeader(header) => Some(header),
            DownloadRow::Item(_) => None,
        }
    }
}

/// Everything the downloads list shows, in display order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DownloadsViewModel {
    pub rows: Vec<DownloadRow>,
}

impl DownloadsViewModel {
    /// Number of asset rows (headers excluded).
    pub fn item_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_item()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub fn items(&self) -> impl Iterator<Item = &DownloadItemViewModel> {
        self.rows.iter().filter_map(DownloadRow::as_item)
    }
}
