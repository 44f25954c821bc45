//! Cell interpreters: binders between one row variant and one cell type.
//!
//! [`CellInterpreter<C, V>`] is generic over its cell `C` and row variant
//! `V`; the adapter only ever sees it through the erased
//! [`RowInterpreter<R>`] trait. Behavior is supplied as closures, so one
//! generic type serves every (cell, variant) pair without subclassing.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::debug;

use super::cell::{CellRegistration, RowCell};
use super::index_path::IndexPath;
use super::row::{RowHeight, RowModel, RowVariant};

/// Callback invoked with the index of a row the user asked to delete.
pub type DeleteHandler = Rc<dyn Fn(IndexPath)>;

type RenderFn<C, V> = Box<dyn Fn(&mut C, &V)>;
type SelectFn<V> = Box<dyn Fn(IndexPath, &V)>;
type HeightFn<V> = Box<dyn Fn(&V) -> RowHeight>;

/// Type-erased interpreter over the row sum type `R`.
pub trait RowInterpreter<R: RowModel> {
    /// Discriminant this interpreter is registered under.
    fn row_kind(&self) -> R::Kind;

    /// Cell type the surface should create for this interpreter's rows.
    fn cell_registration(&self) -> CellRegistration;

    /// Configure `cell` for `row`. A cell or row of the wrong type is ignored.
    fn dequeue(&self, cell: &mut dyn RowCell, row: &R);

    /// Handle a selection of `row` at `at`. A row of the wrong type is ignored.
    fn select(&self, at: IndexPath, row: &R);

    fn height(&self, row: &R) -> RowHeight;

    /// Delete capability, if the interpreter offers one.
    fn delete_handler(&self) -> Option<DeleteHandler> {
        None
    }
}

/// Interpreter binding cell type `C` to row variant `V`.
pub struct CellInterpreter<C, V> {
    render: Option<RenderFn<C, V>>,
    select: Option<SelectFn<V>>,
    height: Option<HeightFn<V>>,
    _marker: PhantomData<fn(&mut C, &V)>,
}

impl<C, V> CellInterpreter<C, V>
where
    C: RowCell + Default,
    V: 'static,
{
    pub fn new() -> Self {
        Self {
            render: None,
            select: None,
            height: None,
            _marker: PhantomData,
        }
    }

    /// Set the render step run when a cell is dequeued for a row.
    pub fn on_dequeue(mut self, render: impl Fn(&mut C, &V) + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Set the selection callback.
    pub fn on_select(mut self, select: impl Fn(IndexPath, &V) + 'static) -> Self {
        self.select = Some(Box::new(select));
        self
    }

    /// Compute the row height from the view-model.
    pub fn with_height(mut self, height: impl Fn(&V) -> RowHeight + 'static) -> Self {
        self.height = Some(Box::new(height));
        self
    }

    pub fn with_fixed_height(self, lines: u16) -> Self {
        self.with_height(move |_| RowHeight::Fixed(lines))
    }
}

impl<C, V> Default for CellInterpreter<C, V>
where
    C: RowCell + Default,
    V: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, V> fmt::Debug for CellInterpreter<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellInterpreter")
            .field("cell", &std::any::type_name::<C>())
            .field("variant", &std::any::type_name::<V>())
            .field("render", &self.render.is_some())
            .field("select", &self.select.is_some())
            .field("height", &self.height.is_some())
            .finish()
    }
}

impl<R, C, V> RowInterpreter<R> for CellInterpreter<C, V>
where
    R: RowModel,
    C: RowCell + Default,
    V: RowVariant<R>,
{
    fn row_kind(&self) -> R::Kind {
        V::kind()
    }

    fn cell_registration(&self) -> CellRegistration {
        CellRegistration::of::<C>()
    }

    fn dequeue(&self, cell: &mut dyn RowCell, row: &R) {
        let Some(cell) = cell.as_any_mut().downcast_mut::<C>() else {
            debug!(
                cell = std::any::type_name::<C>(),
                "dequeue skipped: cell is not the interpreter's cell type"
            );
            return;
        };
        let Some(vm) = V::project(row) else {
            debug!(kind = ?row.kind(), "dequeue skipped: row is not the interpreter's variant");
            return;
        };
        if let Some(render) = &self.render {
            render(cell, vm);
        }
    }

    fn select(&self, at: IndexPath, row: &R) {
        let (Some(select), Some(vm)) = (&self.select, V::project(row)) else {
            return;
        };
        select(at, vm);
    }

    fn height(&self, row: &R) -> RowHeight {
        match (&self.height, V::project(row)) {
            (Some(height), Some(vm)) => height(vm),
            _ => RowHeight::Automatic,
        }
    }
}

/// A [`CellInterpreter`] that also offers a delete action for its rows.
pub struct EditingCellInterpreter<C, V> {
    inner: CellInterpreter<C, V>,
    delete: Option<DeleteHandler>,
}

impl<C, V> EditingCellInterpreter<C, V>
where
    C: RowCell + Default,
    V: 'static,
{
    pub fn new(inner: CellInterpreter<C, V>) -> Self {
        Self {
            inner,
            delete: None,
        }
    }

    pub fn on_delete(mut self, delete: impl Fn(IndexPath) + 'static) -> Self {
        self.delete = Some(Rc::new(delete));
        self
    }
}

impl<C, V> From<CellInterpreter<C, V>> for EditingCellInterpreter<C, V>
where
    C: RowCell + Default,
    V: 'static,
{
    fn from(inner: CellInterpreter<C, V>) -> Self {
        Self::new(inner)
    }
}

impl<C, V> fmt::Debug for EditingCellInterpreter<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditingCellInterpreter")
            .field("inner", &self.inner)
            .field("delete", &self.delete.is_some())
            .finish()
    }
}

impl<R, C, V> RowInterpreter<R> for EditingCellInterpreter<C, V>
where
    R: RowModel,
    C: RowCell + Default,
    V: RowVariant<R>,
{
    fn row_kind(&self) -> R::Kind {
        V::kind()
    }

    fn cell_registration(&self) -> CellRegistration {
        CellRegistration::of::<C>()
    }

    fn dequeue(&self, cell: &mut dyn RowCell, row: &R) {
        RowInterpreter::<R>::dequeue(&self.inner, cell, row)
    }

    fn select(&self, at: IndexPath, row: &R) {
        RowInterpreter::<R>::select(&self.inner, at, row)
    }

    fn height(&self, row: &R) -> RowHeight {
        RowInterpreter::<R>::height(&self.inner, row)
    }

    fn delete_handler(&self) -> Option<DeleteHandler> {
        self.delete.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::{Letter, LetterA, LetterB, TextCell, WideCell};
    use std::cell::RefCell;

    #[test]
    fn test_dequeue_renders_matching_cell_and_variant() {
        let interpreter = CellInterpreter::<TextCell, LetterA>::new()
            .on_dequeue(|cell, vm| cell.text = format!("A{}", vm.0));

        let mut cell = TextCell::default();
        RowInterpreter::<Letter>::dequeue(&interpreter, &mut cell, &Letter::A(LetterA(1)));
        assert_eq!(cell.text, "A1");
    }

    #[test]
    fn test_dequeue_wrong_variant_is_noop() {
        let interpreter = CellInterpreter::<TextCell, LetterA>::new()
            .on_dequeue(|cell, _| cell.text = "touched".to_string());

        let mut cell = TextCell::default();
        RowInterpreter::<Letter>::dequeue(&interpreter, &mut cell, &Letter::B(LetterB(1)));
        assert!(cell.text.is_empty());
    }

    #[test]
    fn test_dequeue_wrong_cell_is_noop() {
        let interpreter = CellInterpreter::<TextCell, LetterA>::new()
            .on_dequeue(|_, _| panic!("render must not run for a foreign cell"));

        let mut cell = WideCell::default();
        RowInterpreter::<Letter>::dequeue(&interpreter, &mut cell, &Letter::A(LetterA(1)));
    }

    #[test]
    fn test_select_without_callback_is_noop() {
        let interpreter = CellInterpreter::<TextCell, LetterA>::new();
        RowInterpreter::<Letter>::select(&interpreter, IndexPath::row(0), &Letter::A(LetterA(1)));
    }

    #[test]
    fn test_select_passes_index_and_vm() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let interpreter = CellInterpreter::<TextCell, LetterA>::new()
            .on_select(move |at, vm| sink.borrow_mut().push((at, vm.0)));

        RowInterpreter::<Letter>::select(&interpreter, IndexPath::row(4), &Letter::A(LetterA(9)));
        RowInterpreter::<Letter>::select(&interpreter, IndexPath::row(5), &Letter::B(LetterB(9)));

        assert_eq!(*seen.borrow(), vec![(IndexPath::row(4), 9)]);
    }

    #[test]
    fn test_height_defaults_to_automatic() {
        let interpreter = CellInterpreter::<TextCell, LetterA>::new();
        assert_eq!(
            RowInterpreter::<Letter>::height(&interpreter, &Letter::A(LetterA(1))),
            RowHeight::Automatic
        );
    }

    #[test]
    fn test_fixed_height() {
        let interpreter = CellInterpreter::<TextCell, LetterA>::new().with_fixed_height(3);
        assert_eq!(
            RowInterpreter::<Letter>::height(&interpreter, &Letter::A(LetterA(1))),
            RowHeight::Fixed(3)
        );
    }

    #[test]
    fn test_height_from_view_model() {
        let interpreter = CellInterpreter::<TextCell, LetterA>::new()
            .with_height(|vm| RowHeight::Fixed(vm.0 as u16));
        assert_eq!(
            RowInterpreter::<Letter>::height(&interpreter, &Letter::A(LetterA(6))),
            RowHeight::Fixed(6)
        );
    }

    #[test]
    fn test_row_kind_and_registration() {
        let interpreter = CellInterpreter::<TextCell, LetterB>::new();
        assert_eq!(RowInterpreter::<Letter>::row_kind(&interpreter), Letter::B(LetterB(0)).kind());
        assert_eq!(
            RowInterpreter::<Letter>::cell_registration(&interpreter).kind,
            crate::table::CellKind::of::<TextCell>()
        );
    }

    #[test]
    fn test_plain_interpreter_has_no_delete() {
        let interpreter = CellInterpreter::<TextCell, LetterA>::new();
        assert!(RowInterpreter::<Letter>::delete_handler(&interpreter).is_none());
    }

    #[test]
    fn test_editing_interpreter_exposes_delete() {
        let deleted = Rc::new(RefCell::new(None));
        let sink = deleted.clone();
        let interpreter = EditingCellInterpreter::new(CellInterpreter::<TextCell, LetterA>::new())
            .on_delete(move |at| *sink.borrow_mut() = Some(at));

        let handler = RowInterpreter::<Letter>::delete_handler(&interpreter).unwrap();
        handler(IndexPath::row(2));
        assert_eq!(*deleted.borrow(), Some(IndexPath::row(2)));
    }

    #[test]
    fn test_editing_interpreter_delegates_render() {
        let interpreter: EditingCellInterpreter<TextCell, LetterA> =
            CellInterpreter::<TextCell, LetterA>::new().on_dequeue(|cell, vm| cell.text = vm.0.to_string()).into();

        let mut cell = TextCell::default();
        RowInterpreter::<Letter>::dequeue(&interpreter, &mut cell, &Letter::A(LetterA(8)));
        assert_eq!(cell.text, "8");
        assert!(RowInterpreter::<Letter>::delete_handler(&interpreter).is_none());
    }
}
