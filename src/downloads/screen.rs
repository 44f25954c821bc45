//! The downloads screen and its state machine.
//!
//! ```text
//! Loading --Loaded(0)--> Empty
//! Loading --Loaded(n)--> Success
//! Loading --LoadFailed--> Error
//! Success --LastRowRemoved--> Empty
//! Error --Retry--> Loading
//! Success|Empty|Error --Refresh--> Loading
//! ```
//!
//! Anything else is ignored.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::DownloadStateEvent;
use crate::table::{EditingTableAdapter, IndexPath, SurfaceHandle, TableAdapter};
use crate::traits::{DisplaySurface, Navigator, ScreenAnalytics};

use super::builder::{DownloadsScope, DownloadsViewModelBuilder};
use super::interactor::DownloadsInteractor;
use super::presenter::{DownloadsPresenter, LoadFailure, LoadJob, LoadOutcome, PresenterEvent};

/// Identity of one open screen; load results are routed back by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenId(Uuid);

impl ScreenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScreenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    Loading,
    Empty,
    Success,
    Error {
        message: String,
        code: &'static str,
        retryable: bool,
    },
}

impl ScreenState {
    pub fn name(&self) -> &'static str {
        match self {
            ScreenState::Loading => "loading",
            ScreenState::Empty => "empty",
            ScreenState::Success => "success",
            ScreenState::Error { .. } => "error",
        }
    }

    /// Apply `event`, returning the next state or `None` when the event
    /// does not apply in this state.
    pub fn next(&self, event: &ScreenEvent) -> Option<ScreenState> {
        match (self, event) {
            (ScreenState::Loading, ScreenEvent::Loaded { items: 0 }) => Some(ScreenState::Empty),
            (ScreenState::Loading, ScreenEvent::Loaded { .. }) => Some(ScreenState::Success),
            (ScreenState::Loading, ScreenEvent::LoadFailed(failure)) => Some(ScreenState::Error {
                message: failure.message.clone(),
                code: failure.code,
                retryable: failure.retryable,
            }),
            (ScreenState::Success, ScreenEvent::LastRowRemoved) => Some(ScreenState::Empty),
            (ScreenState::Error { .. }, ScreenEvent::Retry) => Some(ScreenState::Loading),
            (
                ScreenState::Success | ScreenState::Empty | ScreenState::Error { .. },
                ScreenEvent::Refresh,
            ) => Some(ScreenState::Loading),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    Loaded { items: usize },
    LoadFailed(LoadFailure),
    LastRowRemoved,
    Retry,
    Refresh,
}

/// Collaborators a downloads screen is built from.
#[derive(Clone)]
pub struct DownloadsContext {
    pub interactor: DownloadsInteractor,
    pub navigator: Rc<dyn Navigator>,
    pub analytics: Rc<dyn ScreenAnalytics>,
    pub estimated_row_height: u16,
}

pub struct DownloadsScreen<S: DisplaySurface + 'static> {
    id: ScreenId,
    state: ScreenState,
    surface: Rc<RefCell<S>>,
    presenter: DownloadsPresenter,
    analytics: Rc<dyn ScreenAnalytics>,
}

impl<S: DisplaySurface + 'static> DownloadsScreen<S> {
    pub fn new(scope: DownloadsScope, surface: S, context: DownloadsContext) -> Self {
        let surface = Rc::new(RefCell::new(surface));
        let adapter = EditingTableAdapter::wrap(
            TableAdapter::new().with_estimated_row_height(context.estimated_row_height),
        );
        let mut presenter = DownloadsPresenter::new(
            scope,
            context.interactor,
            DownloadsViewModelBuilder::default(),
            context.navigator,
            adapter,
        );
        let handle: SurfaceHandle = surface.clone();
        presenter.setup(&handle);
        Self {
            id: ScreenId::new(),
            state: ScreenState::Loading,
            surface,
            presenter,
            analytics: context.analytics,
        }
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn scope(&self) -> &DownloadsScope {
        self.presenter.scope()
    }

    pub fn title(&self) -> &str {
        self.presenter.scope().title()
    }

    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    pub fn presenter(&self) -> &DownloadsPresenter {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut DownloadsPresenter {
        &mut self.presenter
    }

    /// The screen became visible: report it and start loading.
    pub fn open(&mut self) -> LoadJob {
        let screen_name = self.scope().screen_name();
        self.analytics.report_screen_opened(screen_name);
        info!(screen = screen_name, id = %self.id, "opened downloads screen");
        self.state = ScreenState::Loading;
        self.presenter.prepare_load()
    }

    /// Apply a finished load. Stale outcomes leave the screen untouched.
    pub fn handle_load(&mut self, outcome: LoadOutcome) {
        let event = match self.presenter.finish_load(outcome) {
            None => return,
            Some(Ok(items)) => ScreenEvent::Loaded { items },
            Some(Err(failure)) => ScreenEvent::LoadFailed(failure),
        };
        self.transition(event);
    }

    pub fn handle_state_change(&mut self, event: &DownloadStateEvent) {
        if self.state == ScreenState::Success {
            self.presenter.apply_state_change(event);
        }
    }

    pub fn select(&mut self, at: IndexPath) {
        if self.state != ScreenState::Success {
            return;
        }
        let events = self.presenter.select(at);
        self.handle_presenter_events(events);
    }

    pub fn delete(&mut self, at: IndexPath) {
        if self.state != ScreenState::Success {
            return;
        }
        let events = self.presenter.delete(at);
        self.handle_presenter_events(events);
    }

    pub fn repeat_last_selection(&mut self) {
        if self.state != ScreenState::Success {
            return;
        }
        let events = self.presenter.repeat_last_selection();
        self.handle_presenter_events(events);
    }

    /// Retry after an error. Returns the new load, if the screen was in error.
    pub fn retry(&mut self) -> Option<LoadJob> {
        if !self.transition(ScreenEvent::Retry) {
            return None;
        }
        Some(self.presenter.prepare_load())
    }

    /// Reload from the store, e.g. after the manifest changed on disk.
    ///
    /// Always issues a job so a load already in flight is superseded.
    pub fn refresh(&mut self) -> LoadJob {
        if self.state != ScreenState::Loading {
            self.transition(ScreenEvent::Refresh);
        }
        self.presenter.prepare_load()
    }

    pub fn empty_state_action(&self) {
        if self.state == ScreenState::Empty {
            self.presenter.empty_state_action();
        }
    }

    fn handle_presenter_events(&mut self, events: Vec<PresenterEvent>) {
        for event in events {
            match event {
                PresenterEvent::ListBecameEmpty => {
                    self.transition(ScreenEvent::LastRowRemoved);
                }
            }
        }
    }

    fn transition(&mut self, event: ScreenEvent) -> bool {
        match self.state.next(&event) {
            Some(next) => {
                debug!(from = self.state.name(), to = next.name(), "screen transition");
                self.state = next;
                true
            }
            None => {
                warn!(state = self.state.name(), ?event, "ignored screen event");
                false
            }
        }
    }
}

impl<S: DisplaySurface + 'static> Drop for DownloadsScreen<S> {
    fn drop(&mut self) {
        self.presenter.teardown();
    }
}

impl<S: DisplaySurface + 'static> fmt::Debug for DownloadsScreen<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadsScreen")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("presenter", &self.presenter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        InMemoryAssetSource, RecordingAnalytics, RecordingNavigator, RecordingSurface,
    };
    use crate::models::{Asset, AssetKind, DownloadState};
    use crate::table::DEFAULT_ESTIMATED_ROW_HEIGHT;
    use std::sync::Arc;

    fn screen(
        assets: Vec<Asset>,
    ) -> (DownloadsScreen<RecordingSurface>, Arc<InMemoryAssetSource>) {
        let source = Arc::new(InMemoryAssetSource::with_assets(assets));
        let context = DownloadsContext {
            interactor: DownloadsInteractor::new(source.clone()),
            navigator: Rc::new(RecordingNavigator::new()),
            analytics: Rc::new(RecordingAnalytics::new()),
            estimated_row_height: DEFAULT_ESTIMATED_ROW_HEIGHT,
        };
        let screen = DownloadsScreen::new(DownloadsScope::All, RecordingSurface::new(), context);
        (screen, source)
    }

    fn movie(id: &str) -> Asset {
        let mut asset = Asset::new(id, AssetKind::Movie, id.to_uppercase());
        asset.state = DownloadState::Completed;
        asset
    }

    fn failure() -> LoadFailure {
        LoadFailure {
            message: "Could not read downloads".to_string(),
            code: "E_STORE_UNREADABLE",
            retryable: true,
        }
    }

    #[test]
    fn test_loading_transitions() {
        let loading = ScreenState::Loading;
        assert_eq!(
            loading.next(&ScreenEvent::Loaded { items: 0 }),
            Some(ScreenState::Empty)
        );
        assert_eq!(
            loading.next(&ScreenEvent::Loaded { items: 3 }),
            Some(ScreenState::Success)
        );
        assert!(matches!(
            loading.next(&ScreenEvent::LoadFailed(failure())),
            Some(ScreenState::Error { retryable: true, .. })
        ));
    }

    #[test]
    fn test_terminal_paths() {
        assert_eq!(
            ScreenState::Success.next(&ScreenEvent::LastRowRemoved),
            Some(ScreenState::Empty)
        );
        let error = ScreenState::Loading
            .next(&ScreenEvent::LoadFailed(failure()))
            .unwrap();
        assert_eq!(error.next(&ScreenEvent::Retry), Some(ScreenState::Loading));
        assert_eq!(
            ScreenState::Empty.next(&ScreenEvent::Refresh),
            Some(ScreenState::Loading)
        );
        assert_eq!(error.next(&ScreenEvent::Refresh), Some(ScreenState::Loading));
    }

    #[test]
    fn test_ignored_events() {
        assert_eq!(ScreenState::Empty.next(&ScreenEvent::LastRowRemoved), None);
        assert_eq!(ScreenState::Success.next(&ScreenEvent::Retry), None);
        assert_eq!(
            ScreenState::Empty.next(&ScreenEvent::Loaded { items: 2 }),
            None
        );
        assert_eq!(ScreenState::Loading.next(&ScreenEvent::Refresh), None);
    }

    #[test]
    fn test_refresh_recovers_from_error() {
        let (mut screen, source) = screen(vec![movie("a")]);
        source.set_load_should_fail(true);
        let job = screen.open();
        screen.handle_load(job.run());
        assert!(matches!(screen.state(), ScreenState::Error { .. }));

        // A refresh from outside (manifest change, parent refresh) reloads too
        source.set_load_should_fail(false);
        let job = screen.refresh();
        assert_eq!(*screen.state(), ScreenState::Loading);
        screen.handle_load(job.run());

        assert_eq!(*screen.state(), ScreenState::Success);
        assert_eq!(screen.presenter().adapter().row_count(), 1);
    }

    #[test]
    fn test_retry_recovers_from_error() {
        let (mut screen, source) = screen(vec![]);
        source.set_load_should_fail(true);
        let job = screen.open();
        screen.handle_load(job.run());

        source.set_load_should_fail(false);
        let job = screen.retry().unwrap();
        screen.handle_load(job.run());

        assert_eq!(*screen.state(), ScreenState::Empty);
        assert!(screen.retry().is_none());
    }
}
