//! Helper functions for UI rendering
//!
//! Width-aware truncation and buffer writes shared by cells and views.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Spinner frames for the loading state
pub const SPINNER_FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];

pub fn spinner_char(frame: usize) -> char {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Get inner rect with margin
pub fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

/// Truncate `s` to at most `max_width` display columns, ending in "..." when
/// anything was cut.
pub fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Write `text` at (`x`, `y`), clipped to `area`. Returns the x after the text.
pub fn render_text(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style, area: Rect) -> u16 {
    if y < area.y || y >= area.bottom() || x >= area.right() {
        return x;
    }
    let max = (area.right() - x) as usize;
    let (end, _) = buf.set_stringn(x, y, text, max, style);
    end
}

/// A text progress bar of `width` cells, e.g. `━━━━────`.
pub fn progress_bar(fraction: f32, width: usize) -> (String, String) {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    ("━".repeat(filled), "─".repeat(width - filled))
}
