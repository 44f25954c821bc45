//! Row cells for the downloads list.
//!
//! ## Layout
//!
//! Download item (four lines, the last one blank):
//! ```text
//! ▸ 3. The Hard Way                                   1.2 GB
//!   Der harte Weg · 4 Mar 2021
//!   Downloading 42%  ━━━━━━━──────────
//! ```
//!
//! Series header (two lines):
//! ```text
//! The Expanse
//! 6 episodes · 8.4 GB
//! ```

use std::any::Any;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::downloads::formatting::format_bytes;
use crate::downloads::{DownloadItemViewModel, SeriesHeaderViewModel};
use crate::models::DownloadState;
use crate::table::RowCell;
use crate::ui::helpers::{progress_bar, render_text, truncate_with_ellipsis};
use crate::ui::theme::{
    state_color, COLOR_ACCENT, COLOR_DIM, COLOR_HEADER, COLOR_HIGHLIGHT_BG, COLOR_PROGRESS,
    COLOR_PROGRESS_BG,
};

/// Lines an item row occupies, including the trailing gap.
pub const ITEM_HEIGHT: u16 = 4;

const PROGRESS_BAR_WIDTH: usize = 20;

#[derive(Debug, Default)]
pub struct DownloadItemCell {
    asset_id: String,
    title: String,
    subtitle: String,
    status: String,
    size: String,
    state: DownloadState,
    is_series: bool,
    watch_progress: f32,
}

impl DownloadItemCell {
    pub fn setup(&mut self, vm: &DownloadItemViewModel) {
        self.asset_id = vm.asset.id.clone();
        self.title = vm.item.title.clone();
        self.subtitle = match (&vm.item.second_title, &vm.item.release_date) {
            (Some(second), Some(date)) => format!("{} · {}", second, date),
            (Some(second), None) => second.clone(),
            (None, Some(date)) => date.clone(),
            (None, None) => String::new(),
        };
        self.status = vm.item.third_title.clone();
        self.size = if vm.asset.byte_count > 0 {
            format_bytes(vm.asset.byte_count)
        } else {
            String::new()
        };
        self.state = vm.state.clone();
        self.is_series = vm.asset.is_series;
        self.watch_progress = vm.asset.watch_progress;
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn marker(&self) -> &'static str {
        if self.is_series {
            "▤"
        } else if self.state.is_completed() {
            "▸"
        } else {
            "·"
        }
    }
}

impl RowCell for DownloadItemCell {
    fn draw(&self, area: Rect, buf: &mut Buffer, highlighted: bool) {
        if area.width < 8 || area.height == 0 {
            return;
        }
        let base = if highlighted {
            Style::default().bg(COLOR_HIGHLIGHT_BG)
        } else {
            Style::default()
        };
        let content_rows = area.height.min(ITEM_HEIGHT - 1);
        buf.set_style(Rect { height: content_rows, ..area }, base);

        let width = area.width as usize;
        let size_width = self.size.chars().count();
        let title_room = width.saturating_sub(size_width + 4);

        // Title line
        let y = area.y;
        render_text(buf, area.x, y, self.marker(), base.fg(COLOR_DIM), area);
        let title_style = base.fg(COLOR_ACCENT).add_modifier(Modifier::BOLD);
        render_text(
            buf,
            area.x + 2,
            y,
            &truncate_with_ellipsis(&self.title, title_room),
            title_style,
            area,
        );
        if size_width > 0 {
            let x = area.right().saturating_sub(size_width as u16 + 1);
            render_text(buf, x, y, &self.size, base.fg(COLOR_DIM), area);
        }

        // Subtitle line
        if area.height > 1 && !self.subtitle.is_empty() {
            render_text(
                buf,
                area.x + 2,
                y + 1,
                &truncate_with_ellipsis(&self.subtitle, width.saturating_sub(3)),
                base.fg(COLOR_DIM),
                area,
            );
        }

        // Status line with progress
        if area.height > 2 {
            let status_style = base.fg(state_color(&self.state));
            let mut x = render_text(
                buf,
                area.x + 2,
                y + 2,
                &truncate_with_ellipsis(&self.status, width.saturating_sub(3)),
                status_style,
                area,
            );
            if let Some(progress) = self.state.progress() {
                let (filled, rest) = progress_bar(progress, PROGRESS_BAR_WIDTH);
                x = render_text(buf, x + 2, y + 2, &filled, base.fg(COLOR_PROGRESS), area);
                render_text(buf, x, y + 2, &rest, base.fg(COLOR_PROGRESS_BG), area);
            } else if self.state.is_completed() && self.watch_progress > 0.0 {
                let watched = format!(" · {}% watched", (self.watch_progress * 100.0).round());
                render_text(buf, x, y + 2, &watched, base.fg(COLOR_DIM), area);
            }
        }
    }

    fn preferred_height(&self, _width: u16) -> u16 {
        ITEM_HEIGHT
    }

    fn prepare_for_reuse(&mut self) {
        *self = Self::default();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct SeriesHeaderCell {
    title: String,
    summary: String,
}

impl SeriesHeaderCell {
    pub fn setup(&mut self, vm: &SeriesHeaderViewModel) {
        self.title = vm.title.clone();
        let episodes = match vm.episode_count {
            1 => "1 episode".to_string(),
            n => format!("{} episodes", n),
        };
        self.summary = format!("{} · {}", episodes, vm.total_size);
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}

impl RowCell for SeriesHeaderCell {
    fn draw(&self, area: Rect, buf: &mut Buffer, _highlighted: bool) {
        if area.height == 0 {
            return;
        }
        let width = area.width as usize;
        render_text(
            buf,
            area.x,
            area.y,
            &truncate_with_ellipsis(&self.title, width),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
            area,
        );
        if area.height > 1 {
            render_text(
                buf,
                area.x,
                area.y + 1,
                &truncate_with_ellipsis(&self.summary, width),
                Style::default().fg(COLOR_DIM),
                area,
            );
        }
    }

    fn preferred_height(&self, _width: u16) -> u16 {
        2
    }

    fn prepare_for_reuse(&mut self) {
        self.title.clear();
        self.summary.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
