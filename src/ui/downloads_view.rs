//! Downloads screen rendering
//!
//! Layout:
//! ```text
//! ╭─ Downloads ───────────────── 3 items ─╮
//! │ <list | spinner | empty | error>       │
//! │                                        │
//! │ ↑↓ move  ⏎ open  d delete  q quit      │
//! ╰────────────────────────────────────────╯
//! ```

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::downloads::{DownloadsScope, DownloadsScreen, ScreenState};
use crate::ui::helpers::{spinner_char, truncate_with_ellipsis};
use crate::ui::list_surface::ListSurface;
use crate::ui::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIALOG_BG, COLOR_DIM, COLOR_FAILED, COLOR_HEADER,
};

/// Shown when nothing is downloaded.
pub const EMPTY_TITLE: &str = "No downloads yet";
pub const EMPTY_BODY: &str = "Movies and episodes you download appear here.";
pub const EMPTY_ACTION: &str = "[Enter] Browse the showcase";
pub const RETRY_HINT: &str = "[r] Retry";

pub fn render_downloads(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let Some(screen) = app.active_screen() else {
        return;
    };

    let count = item_count(screen);
    let title_right = match screen.state() {
        ScreenState::Success => format!(" {} ", pluralize(count, "item")),
        _ => String::new(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Line::from(Span::styled(
            format!(" {} ", breadcrumb(app)),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        )))
        .title(Line::from(Span::styled(title_right, Style::default().fg(COLOR_DIM))).right_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body, footer] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    match screen.state() {
        ScreenState::Loading => render_loading(frame, body, app.tick_count),
        ScreenState::Empty => render_empty(frame, body),
        ScreenState::Error {
            message,
            code,
            retryable,
        } => render_error(frame, body, message, code, *retryable),
        ScreenState::Success => {
            let mut surface = screen.surface().borrow_mut();
            surface.layout(screen.presenter().adapter(), body);
            surface.render(frame.buffer_mut());
        }
    }

    render_footer(frame, footer, app, screen);
}

/// "Downloads" or "Downloads › Series title".
fn breadcrumb(app: &App) -> String {
    app.screens
        .iter()
        .map(|screen| screen.title())
        .collect::<Vec<_>>()
        .join(" › ")
}

fn item_count(screen: &DownloadsScreen<ListSurface>) -> usize {
    screen
        .presenter()
        .adapter()
        .rows()
        .iter()
        .flatten()
        .filter(|row| row.is_item())
        .count()
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn render_loading(frame: &mut Frame, area: Rect, tick: u64) {
    let line = Line::from(vec![
        Span::styled(
            spinner_char((tick / 8) as usize).to_string(),
            Style::default().fg(COLOR_ACCENT),
        ),
        Span::styled(" Loading downloads...", Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center),
        centered_rows(area, 1),
    );
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            EMPTY_TITLE,
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(EMPTY_BODY, Style::default().fg(COLOR_DIM))),
        Line::from(""),
        Line::from(Span::styled(EMPTY_ACTION, Style::default().fg(COLOR_ACCENT))),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered_rows(area, 5),
    );
}

fn render_error(frame: &mut Frame, area: Rect, message: &str, code: &str, retryable: bool) {
    let dialog_area = centered_rows(area, 7);
    let dialog_area = Rect {
        x: dialog_area.x + dialog_area.width / 8,
        width: dialog_area.width - dialog_area.width / 4,
        ..dialog_area
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_FAILED))
        .style(Style::default().bg(COLOR_DIALOG_BG))
        .title(" Error ");

    let mut lines = vec![
        Line::from(Span::styled(
            format!("✗ {}", message),
            Style::default().fg(COLOR_FAILED),
        )),
        Line::from(Span::styled(code.to_string(), Style::default().fg(COLOR_DIM))),
    ];
    if retryable {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            RETRY_HINT,
            Style::default().fg(COLOR_ACCENT),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        dialog_area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App, screen: &DownloadsScreen<ListSurface>) {
    if let Some(status) = app.status() {
        let text = truncate_with_ellipsis(status, area.width as usize);
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(COLOR_ACCENT))),
            area,
        );
        return;
    }

    let mut hints: Vec<(&str, &str)> = Vec::new();
    match screen.state() {
        ScreenState::Success => {
            hints.push(("↑↓", "move"));
            hints.push(("⏎", "open"));
            hints.push(("d", "delete"));
        }
        ScreenState::Empty => hints.push(("⏎", "browse")),
        ScreenState::Error { retryable: true, .. } => hints.push(("r", "retry")),
        ScreenState::Error { .. } | ScreenState::Loading => {}
    }
    if matches!(screen.scope(), DownloadsScope::Series { .. }) {
        hints.push(("esc", "back"));
    }
    hints.push(("q", "quit"));

    let mut spans = Vec::new();
    for (i, (key, label)) in hints.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key, Style::default().fg(COLOR_ACCENT)));
        spans.push(Span::styled(format!(" {}", label), Style::default().fg(COLOR_DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// A `height`-row strip vertically centered in `area`.
fn centered_rows(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        y: area.y + (area.height - height) / 2,
        height,
        ..area
    }
}
