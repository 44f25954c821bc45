//! The table adapter: single source of truth between a row matrix and a
//! display surface.
//!
//! Every row query follows the same path: locate the row at the index,
//! resolve its interpreter by the row's discriminant, delegate. A row whose
//! discriminant has no interpreter is a wiring bug and panics at the first
//! resolution.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::cell::{CellKind, RowCell};
use super::index_path::IndexPath;
use super::interpreter::RowInterpreter;
use super::row::{RowHeight, RowMatrix, RowModel};
use crate::traits::{DisplaySurface, ProviderId, RowAnimation, ScrollPosition, TableDataSource};

/// Shared handle to a surface. The screen owns it; adapters keep a `Weak`.
pub type SurfaceHandle = Rc<RefCell<dyn DisplaySurface>>;

/// Height reported for stale indices when nothing else is configured.
pub const DEFAULT_ESTIMATED_ROW_HEIGHT: u16 = 4;

pub struct TableAdapter<R: RowModel> {
    id: ProviderId,
    interpreters: HashMap<R::Kind, Box<dyn RowInterpreter<R>>>,
    rows: RowMatrix<R>,
    surface: Option<Weak<RefCell<dyn DisplaySurface>>>,
    last_selected: Option<IndexPath>,
    estimated_row_height: u16,
}

impl<R: RowModel> TableAdapter<R> {
    pub fn new() -> Self {
        Self {
            id: ProviderId::next(),
            interpreters: HashMap::new(),
            rows: Vec::new(),
            surface: None,
            last_selected: None,
            estimated_row_height: DEFAULT_ESTIMATED_ROW_HEIGHT,
        }
    }

    pub fn with_estimated_row_height(mut self, lines: u16) -> Self {
        self.estimated_row_height = lines;
        self
    }

    pub fn id(&self) -> ProviderId {
        self.id
    }

    pub fn estimated_row_height(&self) -> u16 {
        self.estimated_row_height
    }

    /// Bind to `surface`, or unbind with `None`.
    ///
    /// The previously bound surface (if still alive) is detached first. The
    /// new surface gets this adapter as its provider and every known cell
    /// type registered.
    pub fn bind(&mut self, surface: Option<&SurfaceHandle>) {
        if let Some(previous) = self.surface.take().and_then(|weak| weak.upgrade()) {
            previous.borrow_mut().detach(self.id);
            debug!(provider = self.id.get(), "detached previous surface");
        }

        let Some(surface) = surface else {
            return;
        };

        {
            let mut target = surface.borrow_mut();
            target.attach(self.id);
            target.set_estimated_row_height(self.estimated_row_height);
            for interpreter in self.interpreters.values() {
                target.register_cell(interpreter.cell_registration());
            }
        }
        self.surface = Some(Rc::downgrade(surface));
        debug!(
            provider = self.id.get(),
            interpreters = self.interpreters.len(),
            "bound surface"
        );
    }

    pub fn is_bound(&self) -> bool {
        self.bound_surface().is_some()
    }

    /// Register `interpreter` under its row kind. A second registration for
    /// the same kind replaces the first.
    pub fn add_interpreter<I>(&mut self, interpreter: I)
    where
        I: RowInterpreter<R> + 'static,
    {
        let kind = interpreter.row_kind();
        if let Some(surface) = self.bound_surface() {
            surface
                .borrow_mut()
                .register_cell(interpreter.cell_registration());
        }
        if self.interpreters.insert(kind, Box::new(interpreter)).is_some() {
            debug!(?kind, "replaced interpreter for row kind");
        }
    }

    /// Replace the row matrix. Does not reload.
    pub fn apply(&mut self, rows: RowMatrix<R>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &RowMatrix<R> {
        &self.rows
    }

    pub fn row(&self, at: IndexPath) -> Option<&R> {
        self.rows.get(at.section)?.get(at.row)
    }

    pub fn row_mut(&mut self, at: IndexPath) -> Option<&mut R> {
        self.rows.get_mut(at.section)?.get_mut(at.row)
    }

    /// Index of the first row matching `predicate`.
    pub fn position(&self, mut predicate: impl FnMut(&R) -> bool) -> Option<IndexPath> {
        self.rows.iter().enumerate().find_map(|(section, rows)| {
            rows.iter()
                .position(&mut predicate)
                .map(|row| IndexPath::new(section, row))
        })
    }

    /// True when no section holds a row.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    pub fn row_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Ask the surface to re-query counts and re-render.
    pub fn reload(&self) {
        let Some(surface) = self.bound_surface() else {
            return;
        };
        let counts: Vec<usize> = self.rows.iter().map(Vec::len).collect();
        surface.borrow_mut().reload_data(&counts);
    }

    /// Re-render the row at `at` in place if its cell is on screen.
    pub fn reload_item_if_needed(&self, at: IndexPath) {
        let (Some(surface), Some(row)) = (self.bound_surface(), self.row(at)) else {
            return;
        };
        let interpreter = self.interpreter_for(row);
        let mut surface = surface.borrow_mut();
        if let Some(cell) = surface.visible_cell_mut(at) {
            interpreter.dequeue(cell, row);
            trace!(%at, "reloaded visible row");
        }
    }

    /// Remove the row at `at` and tell the surface to remove exactly that row.
    ///
    /// Returns the removed row. Out of bounds (against either the matrix or
    /// the surface's counts) or unbound is a no-op.
    pub fn delete_item(&mut self, at: IndexPath, animation: RowAnimation) -> Option<R> {
        let surface = self.bound_surface()?;
        {
            let surface = surface.borrow();
            if at.section >= surface.number_of_sections()
                || at.row >= surface.number_of_rows(at.section)
            {
                debug!(%at, "delete ignored: index outside surface");
                return None;
            }
        }
        let section = self.rows.get_mut(at.section)?;
        if at.row >= section.len() {
            debug!(%at, "delete ignored: index outside rows");
            return None;
        }
        let removed = section.remove(at.row);
        surface.borrow_mut().delete_rows(&[at], animation);
        if let Some(last) = self.last_selected {
            if last.section == at.section && last.row >= at.row {
                self.last_selected = None;
            }
        }
        Some(removed)
    }

    pub fn scroll_to(&self, at: IndexPath, animated: bool) {
        if self.row(at).is_none() {
            return;
        }
        if let Some(surface) = self.bound_surface() {
            surface
                .borrow_mut()
                .scroll_to_row(at, ScrollPosition::Top, animated);
        }
    }

    pub fn last_selected(&self) -> Option<IndexPath> {
        self.last_selected
    }

    /// Replay the selection path for the last selected row.
    pub fn repeat_last_select_index_path(&mut self) {
        let Some(at) = self.last_selected else {
            return;
        };
        if !self.is_bound() {
            return;
        }
        self.did_select_row(at);
    }

    /// Interpreter registered for `row`'s kind.
    ///
    /// # Panics
    ///
    /// Panics if no interpreter is registered for the kind.
    pub fn interpreter_for(&self, row: &R) -> &dyn RowInterpreter<R> {
        let kind = row.kind();
        match self.interpreters.get(&kind) {
            Some(interpreter) => interpreter.as_ref(),
            None => panic!("no interpreter registered for row kind {:?}", kind),
        }
    }

    fn bound_surface(&self) -> Option<SurfaceHandle> {
        self.surface.as_ref().and_then(Weak::upgrade)
    }
}

impl<R: RowModel> Default for TableAdapter<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RowModel> fmt::Debug for TableAdapter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableAdapter")
            .field("id", &self.id)
            .field("kinds", &self.interpreters.keys().collect::<Vec<_>>())
            .field("rows", &self.row_count())
            .field("bound", &self.is_bound())
            .field("last_selected", &self.last_selected)
            .finish()
    }
}

impl<R: RowModel> TableDataSource for TableAdapter<R> {
    fn provider_id(&self) -> ProviderId {
        self.id
    }

    fn number_of_sections(&self) -> usize {
        self.rows.len()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.rows.get(section).map_or(0, Vec::len)
    }

    fn cell_kind(&self, at: IndexPath) -> Option<CellKind> {
        let row = self.row(at)?;
        Some(self.interpreter_for(row).cell_registration().kind)
    }

    fn configure_cell(&self, cell: &mut dyn RowCell, at: IndexPath) {
        if let Some(row) = self.row(at) {
            self.interpreter_for(row).dequeue(cell, row);
        }
    }

    fn height_for_row(&self, at: IndexPath) -> RowHeight {
        match self.row(at) {
            Some(row) => self.interpreter_for(row).height(row),
            None => RowHeight::Fixed(self.estimated_row_height),
        }
    }

    fn did_select_row(&mut self, at: IndexPath) {
        if let Some(surface) = self.bound_surface() {
            surface.borrow_mut().deselect_row(at, true);
        }
        let Some(row) = self.row(at) else {
            debug!(%at, "selection ignored: stale index");
            return;
        };
        self.interpreter_for(row).select(at, row);
        self.last_selected = Some(at);
    }
}
