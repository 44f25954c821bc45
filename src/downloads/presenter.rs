//! Downloads presenter: wires the adapter to the domain.
//!
//! Interpreter callbacks fire while the adapter is borrowed, so they only
//! post a [`RowEvent`] on a channel. The presenter drains that channel on
//! the UI task right after the adapter call returns.
//!
//! Loads run off the UI task. Each [`LoadJob`] is stamped with a
//! generation; only the outcome of the most recently issued job is applied.

use std::rc::Rc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{ErrorContext, ReelError};
use crate::models::{DownloadStateEvent, PlaybackDescriptor};
use crate::table::{
    CellInterpreter, EditingCellInterpreter, EditingTableAdapter, IndexPath, SurfaceHandle,
};
use crate::traits::{Destination, Navigator, RowAnimation, TableDataSource};
use crate::ui::cells::{DownloadItemCell, SeriesHeaderCell};

use super::builder::{DownloadsScope, DownloadsViewModelBuilder};
use super::interactor::DownloadsInteractor;
use super::view_model::{
    DownloadItemViewModel, DownloadRow, DownloadsViewModel, SeriesHeaderViewModel,
};

/// Lines reserved for the series header row.
const SERIES_HEADER_HEIGHT: u16 = 2;

/// Something a row asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum RowEvent {
    Selected {
        at: IndexPath,
        asset_id: String,
        is_series: bool,
        title: String,
    },
    Delete(IndexPath),
}

/// Signals the presenter raises for its screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterEvent {
    /// The last asset row was deleted.
    ListBecameEmpty,
}

/// A load failure in a form the screen can keep and render.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub message: String,
    pub code: &'static str,
    pub retryable: bool,
}

impl From<&ReelError> for LoadFailure {
    fn from(err: &ReelError) -> Self {
        Self {
            message: err.user_message(),
            code: err.error_code(),
            retryable: err.is_retryable(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub generation: u64,
    pub result: Result<DownloadsViewModel, LoadFailure>,
}

/// A list load ready to run away from the UI task.
#[derive(Debug)]
pub struct LoadJob {
    generation: u64,
    scope: DownloadsScope,
    interactor: DownloadsInteractor,
    builder: DownloadsViewModelBuilder,
}

impl LoadJob {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read the assets and build the view-model. Blocking.
    pub fn run(self) -> LoadOutcome {
        let assets = match &self.scope {
            DownloadsScope::All => self.interactor.all_assets(),
            DownloadsScope::Series { series_id, .. } => {
                self.interactor.episode_assets(series_id)
            }
        };
        let result = match assets {
            Ok(assets) => Ok(self.builder.build(&assets, &self.scope)),
            Err(err) => {
                let err = err.with_context(
                    ErrorContext::new("load_downloads")
                        .with_screen(self.scope.screen_name())
                        .with_component("presenter"),
                );
                warn!(
                    code = err.error_code(),
                    category = %err.category(),
                    "downloads load failed: {}",
                    err
                );
                Err(LoadFailure::from(&err))
            }
        };
        LoadOutcome {
            generation: self.generation,
            result,
        }
    }

    /// Run on the blocking pool and hand the outcome to `done`.
    pub fn spawn<F>(self, done: F) -> JoinHandle<()>
    where
        F: FnOnce(LoadOutcome) + Send + 'static,
    {
        tokio::task::spawn_blocking(move || done(self.run()))
    }
}

pub struct DownloadsPresenter {
    scope: DownloadsScope,
    interactor: DownloadsInteractor,
    builder: DownloadsViewModelBuilder,
    navigator: Rc<dyn Navigator>,
    adapter: EditingTableAdapter<DownloadRow>,
    events_tx: mpsc::UnboundedSender<RowEvent>,
    events_rx: mpsc::UnboundedReceiver<RowEvent>,
    generation: u64,
    empty_signaled: bool,
}

impl DownloadsPresenter {
    pub fn new(
        scope: DownloadsScope,
        interactor: DownloadsInteractor,
        builder: DownloadsViewModelBuilder,
        navigator: Rc<dyn Navigator>,
        adapter: EditingTableAdapter<DownloadRow>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut presenter = Self {
            scope,
            interactor,
            builder,
            navigator,
            adapter,
            events_tx,
            events_rx,
            generation: 0,
            empty_signaled: false,
        };
        presenter.register_interpreters();
        presenter
    }

    /// Bind the adapter to the screen's surface.
    pub fn setup(&mut self, surface: &SurfaceHandle) {
        self.adapter.bind(Some(surface));
    }

    pub fn teardown(&mut self) {
        self.adapter.bind(None);
    }

    pub fn scope(&self) -> &DownloadsScope {
        &self.scope
    }

    pub fn adapter(&self) -> &EditingTableAdapter<DownloadRow> {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut EditingTableAdapter<DownloadRow> {
        &mut self.adapter
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Issue a new load. Any job issued earlier becomes stale.
    pub fn prepare_load(&mut self) -> LoadJob {
        self.generation += 1;
        debug!(generation = self.generation, scope = ?self.scope, "prepared downloads load");
        LoadJob {
            generation: self.generation,
            scope: self.scope.clone(),
            interactor: self.interactor.clone(),
            builder: self.builder,
        }
    }

    /// Apply a finished load if it is the current generation.
    ///
    /// Returns `None` for a stale outcome, otherwise the number of asset
    /// rows now shown or the failure.
    pub fn finish_load(&mut self, outcome: LoadOutcome) -> Option<Result<usize, LoadFailure>> {
        if outcome.generation != self.generation {
            info!(
                stale = outcome.generation,
                current = self.generation,
                "discarding stale downloads load"
            );
            return None;
        }
        match outcome.result {
            Ok(view_model) => {
                let count = view_model.item_count();
                self.adapter.apply(vec![view_model.rows]);
                self.adapter.reload();
                self.empty_signaled = count == 0;
                info!(rows = count, scope = self.scope.screen_name(), "downloads loaded");
                Some(Ok(count))
            }
            Err(failure) => Some(Err(failure)),
        }
    }

    /// Rebuild the row the event is about and refresh it in place.
    ///
    /// Returns whether a row matched.
    pub fn apply_state_change(&mut self, event: &DownloadStateEvent) -> bool {
        let Some(at) = self.adapter.position(|row| {
            row.as_item()
                .is_some_and(|item| item.covers(&event.asset_id))
        }) else {
            return false;
        };
        let Some(updated) = self
            .adapter
            .row(at)
            .and_then(DownloadRow::as_item)
            .and_then(|item| {
                self.builder
                    .updated_row(item, &event.asset_id, event.state.clone())
            })
        else {
            return false;
        };
        if let Some(row) = self.adapter.row_mut(at) {
            *row = DownloadRow::Item(updated);
        }
        self.adapter.reload_item_if_needed(at);
        debug!(asset_id = %event.asset_id, %at, "applied download state change");
        true
    }

    /// Select the row at `at` as if the user activated it.
    pub fn select(&mut self, at: IndexPath) -> Vec<PresenterEvent> {
        self.adapter.did_select_row(at);
        self.process_row_events()
    }

    /// Run the delete action of the row at `at`, if it has one.
    pub fn delete(&mut self, at: IndexPath) -> Vec<PresenterEvent> {
        if let Some(action) = self.adapter.edit_actions(at).first() {
            action.activate();
        }
        self.process_row_events()
    }

    pub fn repeat_last_selection(&mut self) -> Vec<PresenterEvent> {
        self.adapter.repeat_last_select_index_path();
        self.process_row_events()
    }

    /// Action behind the empty-state button.
    pub fn empty_state_action(&self) {
        self.navigate(Destination::Showcase);
    }

    pub fn navigate(&self, destination: Destination) {
        info!(?destination, "navigating");
        self.navigator.navigate(destination);
    }

    /// Handle every row event posted since the last call.
    pub fn process_row_events(&mut self) -> Vec<PresenterEvent> {
        let mut raised = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                RowEvent::Selected {
                    asset_id,
                    is_series,
                    title,
                    ..
                } => self.open_asset(asset_id, is_series, title),
                RowEvent::Delete(at) => {
                    if let Some(signal) = self.delete_item_if_needed(at) {
                        raised.push(signal);
                    }
                }
            }
        }
        raised
    }

    fn open_asset(&self, asset_id: String, is_series: bool, title: String) {
        if is_series {
            self.navigate(Destination::SeriesDetail {
                series_id: asset_id,
                title,
            });
            return;
        }
        match self
            .interactor
            .downloaded_asset(&asset_id)
            .as_ref()
            .and_then(PlaybackDescriptor::from_asset)
        {
            Some(descriptor) => self.navigate(Destination::Player(descriptor)),
            None => info!(%asset_id, "selected download is not ready to play"),
        }
    }

    fn delete_item_if_needed(&mut self, at: IndexPath) -> Option<PresenterEvent> {
        let asset_id = self
            .adapter
            .row(at)
            .and_then(DownloadRow::as_item)
            .map(|item| item.asset_id().to_string())?;

        self.interactor.delete_assets(&[asset_id.as_str()]);
        if self.adapter.delete_item(at, RowAnimation::Fade).is_none() {
            warn!(%at, %asset_id, "deleted download but its row could not be removed");
        }
        self.refresh_series_header();

        if self.adapter.rows().iter().flatten().any(DownloadRow::is_item) || self.empty_signaled {
            return None;
        }
        self.empty_signaled = true;
        info!(scope = self.scope.screen_name(), "downloads list became empty");
        Some(PresenterEvent::ListBecameEmpty)
    }

    fn refresh_series_header(&mut self) {
        let DownloadsScope::Series { series_id, title } = &self.scope else {
            return;
        };
        let header_at = IndexPath::row(0);
        if !matches!(self.adapter.row(header_at), Some(DownloadRow::SeriesHeader(_))) {
            return;
        }
        let header = self.builder.header_for_items(
            series_id,
            title,
            self.adapter
                .rows()
                .iter()
                .flatten()
                .filter_map(DownloadRow::as_item),
        );
        if let Some(row) = self.adapter.row_mut(header_at) {
            *row = DownloadRow::SeriesHeader(header);
        }
        self.adapter.reload_item_if_needed(header_at);
    }

    fn register_interpreters(&mut self) {
        let select_tx = self.events_tx.clone();
        let delete_tx = self.events_tx.clone();

        self.adapter.add_interpreter(
            EditingCellInterpreter::new(
                CellInterpreter::<DownloadItemCell, DownloadItemViewModel>::new()
                    .on_dequeue(|cell, vm| cell.setup(vm))
                    .on_select(move |at, vm| {
                        let _ = select_tx.send(RowEvent::Selected {
                            at,
                            asset_id: vm.asset.id.clone(),
                            is_series: vm.asset.is_series,
                            title: vm.asset.title.clone(),
                        });
                    }),
            )
            .on_delete(move |at| {
                let _ = delete_tx.send(RowEvent::Delete(at));
            }),
        );

        self.adapter.add_interpreter(
            CellInterpreter::<SeriesHeaderCell, SeriesHeaderViewModel>::new()
                .on_dequeue(|cell, vm| cell.setup(vm))
                .with_fixed_height(SERIES_HEADER_HEIGHT),
        );
    }
}

impl std::fmt::Debug for DownloadsPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadsPresenter")
            .field("scope", &self.scope)
            .field("adapter", &self.adapter)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
