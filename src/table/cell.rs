//! Recyclable row cells.
//!
//! A cell is the terminal equivalent of a row widget: the surface keeps a
//! pool of them per [`CellKind`], hands one to the data source to configure,
//! and draws it into the row's area.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// A row widget that can be configured, drawn and reused.
pub trait RowCell: Any {
    /// Draw the cell into `area`.
    fn draw(&self, area: Rect, buf: &mut Buffer, highlighted: bool);

    /// Lines the cell needs at `width` when the row height is automatic.
    fn preferred_height(&self, _width: u16) -> u16 {
        1
    }

    /// Reset transient state before the cell is handed out again.
    fn prepare_for_reuse(&mut self) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Identity of a cell type.
#[derive(Clone, Copy)]
pub struct CellKind {
    id: TypeId,
    name: &'static str,
}

impl CellKind {
    pub fn of<C: RowCell>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// Full type name of the cell.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for CellKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CellKind {}

impl Hash for CellKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellKind({})", self.short_name())
    }
}

/// A cell kind plus the factory a surface uses to create fresh cells of it.
#[derive(Clone, Copy)]
pub struct CellRegistration {
    pub kind: CellKind,
    pub factory: fn() -> Box<dyn RowCell>,
}

impl CellRegistration {
    pub fn of<C: RowCell + Default>() -> Self {
        Self {
            kind: CellKind::of::<C>(),
            factory: make_cell::<C>,
        }
    }

    pub fn make(&self) -> Box<dyn RowCell> {
        (self.factory)()
    }
}

impl fmt::Debug for CellRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRegistration")
            .field("kind", &self.kind)
            .finish()
    }
}

fn make_cell<C: RowCell + Default>() -> Box<dyn RowCell> {
    Box::new(C::default())
}
