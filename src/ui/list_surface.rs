//! Terminal list widget that a table adapter drives.
//!
//! Cells are created from registrations, kept while their row stays on
//! screen and returned to a per-kind pool when it scrolls away or the data
//! is reloaded. A visible cell is configured once when it is dequeued;
//! after that only the adapter updates it, through `visible_cell_mut`.
//!
//! Terminal rendering has no row animations, so `RowAnimation` is accepted
//! and logged.

use std::collections::{BTreeMap, HashMap};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

use crate::table::{CellKind, CellRegistration, IndexPath, RowAction, RowActionStyle, RowCell};
use crate::traits::{DisplaySurface, ProviderId, RowAnimation, ScrollPosition, TableDataSource};
use crate::ui::helpers::render_text;
use crate::ui::theme::{COLOR_ACCENT, COLOR_DESTRUCTIVE_BG, COLOR_DIALOG_BG};

struct VisibleRow {
    kind: CellKind,
    cell: Box<dyn RowCell>,
    rect: Rect,
    clipped: bool,
}

/// A revealed row action, as drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionChip {
    pub style: RowActionStyle,
    pub label: String,
    pub icon: String,
    pub width: u16,
}

impl From<&RowAction> for ActionChip {
    fn from(action: &RowAction) -> Self {
        Self {
            style: action.style,
            label: action.label.clone(),
            icon: action.icon.clone(),
            width: action.width,
        }
    }
}

impl ActionChip {
    pub fn text(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }

    /// Column offset that centers the text in a chip `width` cells wide.
    pub fn text_offset(&self, width: u16) -> u16 {
        let text_width = self.text().width() as u16;
        width.saturating_sub(text_width) / 2
    }
}

#[derive(Default)]
pub struct ListSurface {
    provider: Option<ProviderId>,
    registrations: HashMap<CellKind, CellRegistration>,
    pool: HashMap<CellKind, Vec<Box<dyn RowCell>>>,
    visible: BTreeMap<IndexPath, VisibleRow>,
    row_counts: Vec<usize>,
    /// Flat index of the first laid out row
    offset: usize,
    cursor: Option<IndexPath>,
    pending_scroll: Option<(IndexPath, ScrollPosition)>,
    revealed: Option<IndexPath>,
    revealed_actions: Vec<ActionChip>,
    estimated_row_height: u16,
}

impl ListSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<IndexPath> {
        self.cursor
    }

    /// Move the cursor by `delta` rows, clamped to the list.
    pub fn move_cursor(&mut self, delta: isize) {
        let paths = self.index_paths();
        if paths.is_empty() {
            self.cursor = None;
            return;
        }
        let current = self
            .cursor
            .and_then(|c| paths.iter().position(|p| *p == c))
            .unwrap_or(0);
        let next = current
            .saturating_add_signed(delta)
            .min(paths.len() - 1);
        self.cursor = Some(paths[next]);
        if self.revealed != self.cursor {
            self.revealed = None;
        }
    }

    pub fn move_to_first(&mut self) {
        self.cursor = self.index_paths().first().copied();
        self.revealed = None;
    }

    pub fn move_to_last(&mut self) {
        self.cursor = self.index_paths().last().copied();
        self.revealed = None;
    }

    /// Reveal the actions of the row under the cursor.
    pub fn reveal_actions(&mut self) {
        self.revealed = self.cursor;
    }

    pub fn hide_actions(&mut self) {
        self.revealed = None;
        self.revealed_actions.clear();
    }

    /// Row whose actions are revealed.
    pub fn revealed(&self) -> Option<IndexPath> {
        self.revealed
    }

    /// Actions drawn on the revealed row, as of the last layout.
    pub fn revealed_actions(&self) -> &[ActionChip] {
        &self.revealed_actions
    }

    pub fn visible_rows(&self) -> Vec<IndexPath> {
        self.visible.keys().copied().collect()
    }

    pub fn visible_cell<C: RowCell>(&self, at: IndexPath) -> Option<&C> {
        self.visible.get(&at)?.cell.as_any().downcast_ref::<C>()
    }

    /// Cells of `kind` waiting for reuse.
    pub fn pooled(&self, kind: CellKind) -> usize {
        self.pool.get(&kind).map_or(0, Vec::len)
    }

    pub fn total_rows(&self) -> usize {
        self.row_counts.iter().sum()
    }

    /// Place rows of `source` into `area`. Ignored (and the screen cleared)
    /// unless `source` is the attached provider.
    pub fn layout(&mut self, source: &dyn TableDataSource, area: Rect) {
        if self.provider != Some(source.provider_id()) {
            self.recycle_visible();
            self.revealed_actions.clear();
            return;
        }
        let paths = self.index_paths();
        if let Some((at, position)) = self.pending_scroll.take() {
            if let Some(flat) = paths.iter().position(|p| *p == at) {
                let page = self.rows_per_page(area);
                self.offset = match position {
                    ScrollPosition::Top => flat,
                    ScrollPosition::Middle => flat.saturating_sub(page / 2),
                    ScrollPosition::Bottom => flat.saturating_sub(page.saturating_sub(1)),
                };
            }
        }
        self.offset = self.offset.min(paths.len().saturating_sub(1));
        let cursor_flat = self
            .cursor
            .and_then(|c| paths.iter().position(|p| *p == c));
        if let Some(flat) = cursor_flat {
            self.offset = self.offset.min(flat);
        }

        let mut previous = std::mem::take(&mut self.visible);
        loop {
            self.place_rows(source, &paths, area, &mut previous);
            let Some(flat) = cursor_flat else { break };
            let cursor_shown = self
                .visible
                .get(&paths[flat])
                .is_some_and(|row| !row.clipped);
            if cursor_shown || self.offset >= flat {
                break;
            }
            previous.append(&mut self.visible);
            if let Some(row) = previous.remove(&paths[self.offset]) {
                self.recycle(row);
            }
            self.offset += 1;
        }
        for (_, row) in previous {
            self.recycle(row);
        }

        self.revealed_actions = match self.revealed {
            Some(at) if self.visible.contains_key(&at) => {
                source.edit_actions(at).iter().map(ActionChip::from).collect()
            }
            _ => Vec::new(),
        };
        if self.revealed_actions.is_empty() {
            self.revealed = None;
        }
    }

    /// Draw the rows placed by the last layout.
    pub fn render(&self, buf: &mut Buffer) {
        for (at, row) in &self.visible {
            row.cell.draw(row.rect, buf, self.cursor == Some(*at));
            if self.revealed == Some(*at) {
                self.draw_actions(row.rect, buf);
            }
        }
    }

    fn draw_actions(&self, rect: Rect, buf: &mut Buffer) {
        let mut right = rect.right();
        let rows = rect.height.min(3);
        for chip in &self.revealed_actions {
            let width = chip.width.min(right.saturating_sub(rect.x));
            if width == 0 {
                break;
            }
            let chip_rect = Rect::new(right - width, rect.y, width, rows);
            let bg = match chip.style {
                RowActionStyle::Destructive => COLOR_DESTRUCTIVE_BG,
                RowActionStyle::Normal => COLOR_DIALOG_BG,
            };
            let style = Style::default().bg(bg).fg(COLOR_ACCENT);
            buf.set_style(chip_rect, style);
            let text = chip.text();
            let x = chip_rect.x + chip.text_offset(width);
            let y = chip_rect.y + rows / 2;
            render_text(buf, x, y, &text, style.add_modifier(Modifier::BOLD), chip_rect);
            right -= width;
        }
    }

    fn place_rows(
        &mut self,
        source: &dyn TableDataSource,
        paths: &[IndexPath],
        area: Rect,
        previous: &mut BTreeMap<IndexPath, VisibleRow>,
    ) {
        let mut y = area.y;
        for at in paths.iter().skip(self.offset).copied() {
            if y >= area.bottom() {
                break;
            }
            let Some(kind) = source.cell_kind(at) else {
                continue;
            };
            let cell = match previous.remove(&at) {
                Some(row) if row.kind == kind => Some(row.cell),
                Some(row) => {
                    self.recycle(row);
                    None
                }
                None => None,
            };
            let cell = match cell {
                Some(cell) => cell,
                None => {
                    let Some(mut cell) = self.dequeue(kind) else {
                        debug!(?kind, "no registration for cell kind");
                        continue;
                    };
                    source.configure_cell(cell.as_mut(), at);
                    cell
                }
            };
            let height = source
                .height_for_row(at)
                .resolve(|| cell.preferred_height(area.width))
                .max(1);
            let available = area.bottom() - y;
            let rect = Rect::new(area.x, y, area.width, height.min(available));
            self.visible.insert(
                at,
                VisibleRow {
                    kind,
                    cell,
                    rect,
                    clipped: height > available,
                },
            );
            y = y.saturating_add(height);
        }
    }

    fn dequeue(&mut self, kind: CellKind) -> Option<Box<dyn RowCell>> {
        if let Some(cell) = self.pool.get_mut(&kind).and_then(Vec::pop) {
            return Some(cell);
        }
        self.registrations.get(&kind).map(CellRegistration::make)
    }

    fn recycle(&mut self, mut row: VisibleRow) {
        row.cell.prepare_for_reuse();
        self.pool.entry(row.kind).or_default().push(row.cell);
    }

    fn recycle_visible(&mut self) {
        let visible = std::mem::take(&mut self.visible);
        for (_, row) in visible {
            self.recycle(row);
        }
    }

    fn index_paths(&self) -> Vec<IndexPath> {
        self.row_counts
            .iter()
            .enumerate()
            .flat_map(|(section, count)| (0..*count).map(move |row| IndexPath::new(section, row)))
            .collect()
    }

    fn rows_per_page(&self, area: Rect) -> usize {
        (area.height / self.estimated_row_height.max(1)).max(1) as usize
    }

    fn clamp_cursor(&mut self) {
        let paths = self.index_paths();
        self.cursor = match self.cursor {
            _ if paths.is_empty() => None,
            None => Some(paths[0]),
            Some(cursor) if paths.contains(&cursor) => Some(cursor),
            Some(cursor) => paths
                .iter()
                .rev()
                .find(|p| **p <= cursor)
                .or_else(|| paths.first())
                .copied(),
        };
    }
}

impl DisplaySurface for ListSurface {
    fn attach(&mut self, provider: ProviderId) {
        self.provider = Some(provider);
    }

    fn detach(&mut self, provider: ProviderId) {
        if self.provider == Some(provider) {
            self.provider = None;
            self.recycle_visible();
            self.row_counts.clear();
            self.cursor = None;
            self.revealed = None;
        }
    }

    fn provider(&self) -> Option<ProviderId> {
        self.provider
    }

    fn register_cell(&mut self, registration: CellRegistration) {
        self.registrations.insert(registration.kind, registration);
    }

    fn reload_data(&mut self, row_counts: &[usize]) {
        self.recycle_visible();
        self.row_counts = row_counts.to_vec();
        self.revealed = None;
        self.clamp_cursor();
        trace!(?row_counts, "list reloaded");
    }

    fn delete_rows(&mut self, at: &[IndexPath], animation: RowAnimation) {
        let mut targets = at.to_vec();
        targets.sort_unstable_by(|a, b| b.cmp(a));
        for target in targets {
            let Some(count) = self.row_counts.get_mut(target.section) else {
                continue;
            };
            if target.row >= *count {
                continue;
            }
            *count -= 1;
            if let Some(row) = self.visible.remove(&target) {
                self.recycle(row);
            }
            let shifted: Vec<IndexPath> = self
                .visible
                .range(IndexPath::new(target.section, target.row + 1)..IndexPath::new(target.section + 1, 0))
                .map(|(path, _)| *path)
                .collect();
            for path in shifted {
                if let Some(row) = self.visible.remove(&path) {
                    self.visible
                        .insert(IndexPath::new(path.section, path.row - 1), row);
                }
            }
            if let Some(cursor) = self.cursor {
                if cursor.section == target.section && cursor.row > target.row {
                    self.cursor = Some(IndexPath::new(cursor.section, cursor.row - 1));
                }
            }
        }
        self.revealed = None;
        self.revealed_actions.clear();
        self.clamp_cursor();
        debug!(rows = at.len(), ?animation, "rows deleted");
    }

    fn visible_cell_mut(&mut self, at: IndexPath) -> Option<&mut dyn RowCell> {
        self.visible.get_mut(&at).map(|row| row.cell.as_mut())
    }

    fn scroll_to_row(&mut self, at: IndexPath, position: ScrollPosition, _animated: bool) {
        self.pending_scroll = Some((at, position));
        self.cursor = Some(at);
    }

    fn deselect_row(&mut self, at: IndexPath, _animated: bool) {
        if self.revealed == Some(at) {
            self.hide_actions();
        }
    }

    fn number_of_sections(&self) -> usize {
        self.row_counts.len()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        self.row_counts.get(section).copied().unwrap_or(0)
    }

    fn set_estimated_row_height(&mut self, lines: u16) {
        self.estimated_row_height = lines;
    }
}

impl std::fmt::Debug for ListSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSurface")
            .field("provider", &self.provider)
            .field("row_counts", &self.row_counts)
            .field("visible", &self.visible.len())
            .field("cursor", &self.cursor)
            .field("offset", &self.offset)
            .finish()
    }
}
