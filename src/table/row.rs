//! Row models and the discriminants used to dispatch them.
//!
//! A list holds one sum type `R: RowModel`. Each payload type of that sum
//! type implements [`RowVariant<R>`], which names the discriminant it lives
//! under and extracts itself from a row. Interpreters are looked up by
//! discriminant, so no runtime type reflection is involved.

use std::fmt::Debug;
use std::hash::Hash;

/// The row sum type displayed by a [`TableAdapter`](super::TableAdapter).
pub trait RowModel: 'static {
    /// Explicit discriminant of the sum type.
    type Kind: Copy + Eq + Hash + Debug + 'static;

    fn kind(&self) -> Self::Kind;
}

/// One payload type of a row sum type.
pub trait RowVariant<R: RowModel>: Sized + 'static {
    /// The discriminant rows of this variant report.
    fn kind() -> R::Kind;

    /// Extract this variant from a row, or `None` if the row is another variant.
    fn project(row: &R) -> Option<&Self>;
}

/// Sections of rows, in display order.
pub type RowMatrix<R> = Vec<Vec<R>>;

/// Height a row asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowHeight {
    /// The surface measures the cell.
    #[default]
    Automatic,
    /// Exactly this many terminal lines.
    Fixed(u16),
}

impl RowHeight {
    /// Resolve to a line count, measuring with `measure` when automatic.
    pub fn resolve(self, measure: impl FnOnce() -> u16) -> u16 {
        match self {
            RowHeight::Automatic => measure(),
            RowHeight::Fixed(lines) => lines,
        }
    }
}
