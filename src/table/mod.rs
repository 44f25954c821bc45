//! Generic, type-erased list binding.
//!
//! A [`TableAdapter`] owns a matrix of rows of one sum type and drives a
//! [`DisplaySurface`](crate::traits::DisplaySurface). Rendering, selection
//! and height are resolved per row by looking up the row's discriminant in
//! a registry of [`RowInterpreter`]s. [`CellInterpreter`] is the closure
//! based implementation used everywhere; [`EditingCellInterpreter`] and
//! [`EditingTableAdapter`] add swipe-to-delete.
//!
//! # Example
//!
//! ```ignore
//! let mut adapter = EditingTableAdapter::<DownloadRow>::new();
//! adapter.add_interpreter(
//!     EditingCellInterpreter::new(
//!         CellInterpreter::<DownloadItemCell, DownloadItemViewModel>::new()
//!             .on_dequeue(|cell, vm| cell.setup(vm)),
//!     )
//!     .on_delete(move |at| events.send(RowEvent::Delete(at))),
//! );
//! adapter.bind(Some(&surface));
//! adapter.apply(vec![rows]);
//! adapter.reload();
//! ```

pub mod adapter;
pub mod cell;
pub mod editing;
pub mod index_path;
pub mod interpreter;
pub mod row;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{SurfaceHandle, TableAdapter, DEFAULT_ESTIMATED_ROW_HEIGHT};
pub use cell::{CellKind, CellRegistration, RowCell};
pub use editing::{DeleteActionStyle, EditingTableAdapter, RowAction, RowActionStyle};
pub use index_path::IndexPath;
pub use interpreter::{CellInterpreter, DeleteHandler, EditingCellInterpreter, RowInterpreter};
pub use row::{RowHeight, RowMatrix, RowModel, RowVariant};
