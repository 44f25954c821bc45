//! Row and cell fixtures shared by the table unit tests.

use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use super::cell::RowCell;
use super::row::{RowModel, RowVariant};

#[derive(Debug, Clone, PartialEq)]
pub struct LetterA(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct LetterB(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub enum Letter {
    A(LetterA),
    B(LetterB),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterKind {
    A,
    B,
}

impl RowModel for Letter {
    type Kind = LetterKind;

    fn kind(&self) -> LetterKind {
        match self {
            Letter::A(_) => LetterKind::A,
            Letter::B(_) => LetterKind::B,
        }
    }
}

impl RowVariant<Letter> for LetterA {
    fn kind() -> LetterKind {
        LetterKind::A
    }

    fn project(row: &Letter) -> Option<&Self> {
        match row {
            Letter::A(a) => Some(a),
            _ => None,
        }
    }
}

impl RowVariant<Letter> for LetterB {
    fn kind() -> LetterKind {
        LetterKind::B
    }

    fn project(row: &Letter) -> Option<&Self> {
        match row {
            Letter::B(b) => Some(b),
            _ => None,
        }
    }
}

pub fn a(n: u32) -> Letter {
    Letter::A(LetterA(n))
}

pub fn b(n: u32) -> Letter {
    Letter::B(LetterB(n))
}

#[derive(Debug, Default)]
pub struct TextCell {
    pub text: String,
}

impl RowCell for TextCell {
    fn draw(&self, area: Rect, buf: &mut Buffer, _highlighted: bool) {
        buf.set_string(area.x, area.y, &self.text, Style::default());
    }

    fn prepare_for_reuse(&mut self) {
        self.text.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct WideCell {
    pub lines: Vec<String>,
}

impl RowCell for WideCell {
    fn draw(&self, area: Rect, buf: &mut Buffer, _highlighted: bool) {
        for (offset, line) in self.lines.iter().enumerate().take(area.height as usize) {
            buf.set_string(area.x, area.y + offset as u16, line, Style::default());
        }
    }

    fn preferred_height(&self, _width: u16) -> u16 {
        self.lines.len().max(1) as u16
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
