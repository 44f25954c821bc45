//! Recording display surface for testing.
//!
//! Records every call a table adapter makes and keeps just enough state
//! (row counts, registered cells, materialized visible cells) for the
//! adapter's bounds checks and in-place reloads to behave as they would
//! against a real list.

use std::collections::{BTreeMap, HashMap};

use crate::table::{CellKind, CellRegistration, IndexPath, RowCell};
use crate::traits::{DisplaySurface, ProviderId, RowAnimation, ScrollPosition, TableDataSource};

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Attach(ProviderId),
    Detach(ProviderId),
    RegisterCell(CellKind),
    ReloadData(Vec<usize>),
    DeleteRows(Vec<IndexPath>, RowAnimation),
    ScrollToRow(IndexPath, ScrollPosition, bool),
    DeselectRow(IndexPath),
    SetEstimatedRowHeight(u16),
}

#[derive(Default)]
pub struct RecordingSurface {
    provider: Option<ProviderId>,
    registrations: HashMap<CellKind, CellRegistration>,
    row_counts: Vec<usize>,
    visible: BTreeMap<IndexPath, Box<dyn RowCell>>,
    calls: Vec<SurfaceCall>,
    estimated_row_height: u16,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count_calls(&self, predicate: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn is_registered(&self, kind: CellKind) -> bool {
        self.registrations.contains_key(&kind)
    }

    pub fn registered_count(&self) -> usize {
        self.registrations.len()
    }

    pub fn estimated_row_height(&self) -> u16 {
        self.estimated_row_height
    }

    /// Materialize cells for the first `max_rows` rows of `source`, the way a
    /// list does when it first appears. Ignored unless `source` is the
    /// attached provider.
    pub fn layout(&mut self, source: &dyn TableDataSource, max_rows: usize) {
        if self.provider != Some(source.provider_id()) {
            return;
        }
        self.visible.clear();
        let mut remaining = max_rows;
        for section in 0..source.number_of_sections() {
            for row in 0..source.number_of_rows(section) {
                if remaining == 0 {
                    return;
                }
                let at = IndexPath::new(section, row);
                let Some(registration) = source
                    .cell_kind(at)
                    .and_then(|kind| self.registrations.get(&kind))
                else {
                    continue;
                };
                let mut cell = registration.make();
                source.configure_cell(cell.as_mut(), at);
                self.visible.insert(at, cell);
                remaining -= 1;
            }
        }
    }

    /// Index paths with a materialized cell.
    pub fn visible_rows(&self) -> Vec<IndexPath> {
        self.visible.keys().copied().collect()
    }

    /// The visible cell at `at`, downcast to `C`.
    pub fn visible_cell<C: RowCell>(&self, at: IndexPath) -> Option<&C> {
        self.visible.get(&at)?.as_any().downcast_ref::<C>()
    }

    fn remove_visible(&mut self, at: IndexPath) {
        self.visible.remove(&at);
        let shifted: Vec<IndexPath> = self
            .visible
            .range(IndexPath::new(at.section, at.row + 1)..IndexPath::new(at.section + 1, 0))
            .map(|(path, _)| *path)
            .collect();
        for path in shifted {
            if let Some(cell) = self.visible.remove(&path) {
                self.visible
                    .insert(IndexPath::new(path.section, path.row - 1), cell);
            }
        }
    }
}

impl DisplaySurface for RecordingSurface {
    fn attach(&mut self, provider: ProviderId) {
        self.provider = Some(provider);
        self.calls.push(SurfaceCall::Attach(provider));
    }

    fn detach(&mut self, provider: ProviderId) {
        if self.provider == Some(provider) {
            self.provider = None;
            self.visible.clear();
        }
        self.calls.push(SurfaceCall::Detach(provider));
    }

    fn provider(&self) -> Option<ProviderId> {
        self.provider
    }

    fn register_cell(&mut self, registration: CellRegistration) {
        self.registrations.insert(registration.kind, registration);
        self.calls.push(SurfaceCall::RegisterCell(registration.kind));
    }

    fn reload_data(&mut self, row_counts: &[usize]) {
        self.row_counts = row_counts.to_vec();
        self.visible.clear();
        self.calls.push(SurfaceCall::ReloadData(row_counts.to_vec()));
    }

    fn delete_rows(&mut self, at: &[IndexPath], animation: RowAnimation) {
        for path in at {
            if let Some(count) = self.row_counts.get_mut(path.section) {
                if path.row < *count {
                    *count -= 1;
                    self.remove_visible(*path);
                }
            }
        }
        self.calls.push(SurfaceCall::DeleteRows(at.to_vec(), animation));
    }

    fn visible_cell_mut(&mut self, at: IndexPath) -> Option<&mut dyn RowCell> {
        let cell = self.visible.get_mut(&at)?;
        Some(cell.as_mut())
    }

    fn scroll_to_row(&mut self, at: IndexPath, position: ScrollPosition, animated: bool) {
        self.calls
            .push(SurfaceCall::ScrollToRow(at, position, animated));
    }

    fn deselect_row(&mut self, at: IndexPath, _animated: bool) {
        self.calls.push(SurfaceCall::DeselectRow(at));
    }

    fn number_of_sections(&self) -> usize {
        self.row_counts.len()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.row_counts.get(section).copied().unwrap_or(0)
    }

    fn set_estimated_row_height(&mut self, lines: u16) {
        self.estimated_row_height = lines;
        self.calls.push(SurfaceCall::SetEstimatedRowHeight(lines));
    }
}
