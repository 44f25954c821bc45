//! Display surface and data source abstractions.
//!
//! A [`DisplaySurface`] is the list widget a table adapter drives: it
//! recycles cells, knows which rows are visible and animates structural
//! changes. A [`TableDataSource`] is what the surface queries while laying
//! out. The two meet through a [`ProviderId`]: the surface only honors the
//! data source it is currently attached to.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::table::{CellKind, CellRegistration, IndexPath, RowAction, RowCell, RowHeight};

/// Identity of a data source bound to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProviderId(u64);

impl ProviderId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Animation used when rows are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowAnimation {
    None,
    Fade,
    Left,
    Right,
    #[default]
    Automatic,
}

/// Where a scrolled-to row should end up in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPosition {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// A list widget driven by a table adapter.
pub trait DisplaySurface {
    /// Make `provider` the data source this surface answers to.
    fn attach(&mut self, provider: ProviderId);

    /// Drop `provider` if it is the attached data source.
    fn detach(&mut self, provider: ProviderId);

    fn provider(&self) -> Option<ProviderId>;

    /// Register a cell type so the surface can create and recycle it.
    fn register_cell(&mut self, registration: CellRegistration);

    /// Forget all rows and adopt `row_counts` (one entry per section).
    fn reload_data(&mut self, row_counts: &[usize]);

    /// Remove exactly the given rows.
    fn delete_rows(&mut self, at: &[IndexPath], animation: RowAnimation);

    /// The cell currently on screen for `at`, if any.
    fn visible_cell_mut(&mut self, at: IndexPath) -> Option<&mut dyn RowCell>;

    fn scroll_to_row(&mut self, at: IndexPath, position: ScrollPosition, animated: bool);

    fn deselect_row(&mut self, at: IndexPath, animated: bool);

    fn number_of_sections(&self) -> usize;

    fn number_of_rows(&self, section: usize) -> usize;

    /// Height used for rows that have not been measured yet.
    fn set_estimated_row_height(&mut self, lines: u16);
}

/// What a surface queries while laying out and handling input.
pub trait TableDataSource {
    fn provider_id(&self) -> ProviderId;

    fn number_of_sections(&self) -> usize;

    fn number_of_rows(&self, section: usize) -> usize;

    /// Cell kind to dequeue for `at`, or `None` for a stale index.
    fn cell_kind(&self, at: IndexPath) -> Option<CellKind>;

    /// Run the row's render step against a dequeued cell.
    fn configure_cell(&self, cell: &mut dyn RowCell, at: IndexPath);

    fn height_for_row(&self, at: IndexPath) -> RowHeight;

    fn did_select_row(&mut self, at: IndexPath);

    /// Swipe actions for `at`. None by default.
    fn edit_actions(&self, _at: IndexPath) -> Vec<RowAction> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_ids_are_unique() {
        let first = ProviderId::next();
        let second = ProviderId::next();
        assert_ne!(first, second);
        assert!(second.get() > first.get());
    }
}
