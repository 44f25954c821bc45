//! The downloads feature: list, series drill-down and deletion.
//!
//! Data flows one way. [`DownloadsInteractor`] reads assets from an
//! [`AssetSource`](crate::traits::AssetSource), [`DownloadsViewModelBuilder`]
//! turns them into rows, and [`DownloadsPresenter`] feeds the rows to an
//! editing table adapter. [`DownloadsScreen`] owns the presenter and the
//! loading/empty/success/error state.

pub mod builder;
pub mod cell_builder;
pub mod formatting;
pub mod interactor;
pub mod presenter;
pub mod screen;
pub mod view_model;

pub use builder::{DownloadsScope, DownloadsViewModelBuilder};
pub use cell_builder::DownloadsCellViewModelBuilder;
pub use interactor::DownloadsInteractor;
pub use presenter::{
    DownloadsPresenter, LoadFailure, LoadJob, LoadOutcome, PresenterEvent, RowEvent,
};
pub use screen::{DownloadsContext, DownloadsScreen, ScreenEvent, ScreenId, ScreenState};
pub use view_model::{
    AssetInfoViewModel, DownloadItemViewModel, DownloadRow, DownloadRowKind, DownloadsViewModel,
    EpisodeItemViewModel, SeriesHeaderViewModel,
};
