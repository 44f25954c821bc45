//! Row actions on top of [`TableAdapter`].
//!
//! [`EditingTableAdapter`] answers `edit_actions` for rows whose interpreter
//! exposes a delete handler. It never mutates the row matrix itself: the
//! handler (owned by the presenter) calls back into `delete_item`.

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::adapter::TableAdapter;
use super::cell::{CellKind, RowCell};
use super::index_path::IndexPath;
use super::interpreter::DeleteHandler;
use super::row::{RowHeight, RowModel};
use crate::traits::{ProviderId, TableDataSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionStyle {
    Normal,
    Destructive,
}

/// Styling for the delete action. Purely presentational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteActionStyle {
    pub label: String,
    pub icon: String,
    pub width: u16,
}

impl Default for DeleteActionStyle {
    fn default() -> Self {
        Self {
            label: "Delete".to_string(),
            icon: "✕".to_string(),
            width: 10,
        }
    }
}

/// An action offered for one row.
#[derive(Clone)]
pub struct RowAction {
    pub style: RowActionStyle,
    pub label: String,
    pub icon: String,
    pub width: u16,
    at: IndexPath,
    handler: DeleteHandler,
}

impl RowAction {
    pub fn index_path(&self) -> IndexPath {
        self.at
    }

    /// Run the action for its row.
    pub fn activate(&self) {
        (self.handler)(self.at)
    }
}

impl fmt::Debug for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("style", &self.style)
            .field("label", &self.label)
            .field("at", &self.at)
            .finish()
    }
}

pub struct EditingTableAdapter<R: RowModel> {
    base: TableAdapter<R>,
    delete_style: DeleteActionStyle,
}

impl<R: RowModel> EditingTableAdapter<R> {
    pub fn new() -> Self {
        Self::wrap(TableAdapter::new())
    }

    pub fn wrap(base: TableAdapter<R>) -> Self {
        Self {
            base,
            delete_style: DeleteActionStyle::default(),
        }
    }

    pub fn with_delete_style(mut self, style: DeleteActionStyle) -> Self {
        self.delete_style = style;
        self
    }

    /// Actions for the row at `at`: one destructive action when its
    /// interpreter can delete, otherwise none. A stale index yields none.
    pub fn edit_actions(&self, at: IndexPath) -> Vec<RowAction> {
        let Some(row) = self.base.row(at) else {
            return Vec::new();
        };
        match self.base.interpreter_for(row).delete_handler() {
            Some(handler) => vec![RowAction {
                style: RowActionStyle::Destructive,
                label: self.delete_style.label.clone(),
                icon: self.delete_style.icon.clone(),
                width: self.delete_style.width,
                at,
                handler,
            }],
            None => Vec::new(),
        }
    }
}

impl<R: RowModel> Default for EditingTableAdapter<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RowModel> Deref for EditingTableAdapter<R> {
    type Target = TableAdapter<R>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl<R: RowModel> DerefMut for EditingTableAdapter<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}

impl<R: RowModel> fmt::Debug for EditingTableAdapter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditingTableAdapter")
            .field("base", &self.base)
            .finish()
    }
}

impl<R: RowModel> TableDataSource for EditingTableAdapter<R> {
    fn provider_id(&self) -> ProviderId {
        self.base.provider_id()
    }

    fn number_of_sections(&self) -> usize {
        self.base.number_of_sections()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.base.number_of_rows(section)
    }

    fn cell_kind(&self, at: IndexPath) -> Option<CellKind> {
        self.base.cell_kind(at)
    }

    fn configure_cell(&self, cell: &mut dyn RowCell, at: IndexPath) {
        self.base.configure_cell(cell, at)
    }

    fn height_for_row(&self, at: IndexPath) -> RowHeight {
        self.base.height_for_row(at)
    }

    fn did_select_row(&mut self, at: IndexPath) {
        self.base.did_select_row(at)
    }

    fn edit_actions(&self, at: IndexPath) -> Vec<RowAction> {
        EditingTableAdapter::edit_actions(self, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::{a, b, Letter, LetterA, LetterB, TextCell};
    use crate::table::{CellInterpreter, EditingCellInterpreter};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn adapter(deleted: Rc<RefCell<Vec<IndexPath>>>) -> EditingTableAdapter<Letter> {
        let mut adapter = EditingTableAdapter::new();
        adapter.add_interpreter(
            EditingCellInterpreter::new(CellInterpreter::<TextCell, LetterA>::new())
                .on_delete(move |at| deleted.borrow_mut().push(at)),
        );
        adapter.add_interpreter(CellInterpreter::<TextCell, LetterB>::new());
        adapter
    }

    #[test]
    fn test_one_destructive_action_for_deletable_rows() {
        let deleted = Rc::new(RefCell::new(Vec::new()));
        let mut adapter = adapter(deleted.clone());
        adapter.apply(vec![vec![a(1), b(2), a(3)]]);

        for row in [0, 2] {
            let actions = adapter.edit_actions(IndexPath::row(row));
            assert_eq!(actions.len(), 1);
            assert_eq!(actions[0].style, RowActionStyle::Destructive);
            assert_eq!(actions[0].label, "Delete");
            assert_eq!(actions[0].index_path(), IndexPath::row(row));
        }
    }

    #[test]
    fn test_no_actions_without_delete_capability() {
        let deleted = Rc::new(RefCell::new(Vec::new()));
        let mut adapter = adapter(deleted);
        adapter.apply(vec![vec![a(1), b(2)]]);

        assert!(adapter.edit_actions(IndexPath::row(1)).is_empty());
        assert!(adapter.edit_actions(IndexPath::row(9)).is_empty());
    }

    #[test]
    fn test_activate_calls_handler_and_leaves_rows_alone() {
        let deleted = Rc::new(RefCell::new(Vec::new()));
        let mut adapter = adapter(deleted.clone());
        adapter.apply(vec![vec![a(1), a(2)]]);

        let actions = adapter.edit_actions(IndexPath::row(1));
        actions[0].activate();

        assert_eq!(*deleted.borrow(), vec![IndexPath::row(1)]);
        assert_eq!(adapter.row_count(), 2);
    }

    #[test]
    fn test_data_source_edit_actions_use_decorator() {
        let deleted = Rc::new(RefCell::new(Vec::new()));
        let mut adapter = adapter(deleted);
        adapter.apply(vec![vec![a(1)]]);

        let source: &dyn TableDataSource = &adapter;
        assert_eq!(source.edit_actions(IndexPath::row(0)).len(), 1);

        let base: &dyn TableDataSource = &*adapter;
        assert!(base.edit_actions(IndexPath::row(0)).is_empty());
    }

    #[test]
    fn test_custom_delete_style() {
        let deleted = Rc::new(RefCell::new(Vec::new()));
        let mut adapter = adapter(deleted).with_delete_style(DeleteActionStyle {
            label: "Remove".to_string(),
            icon: "-".to_string(),
            width: 8,
        });
        adapter.apply(vec![vec![a(1)]]);

        let action = &adapter.edit_actions(IndexPath::row(0))[0];
        assert_eq!(action.label, "Remove");
        assert_eq!(action.width, 8);
    }
}
