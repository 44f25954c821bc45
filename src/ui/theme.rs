//! Color theme constants for the reel UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

use crate::models::DownloadState;

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color - white for titles and the highlighted row
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for secondary lines and key hints
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background of the highlighted row
pub const COLOR_HIGHLIGHT_BG: Color = Color::Rgb(30, 34, 48);

// ============================================================================
// Download State Colors
// ============================================================================

/// Downloading - bright green
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Queued - gray
pub const COLOR_QUEUED: Color = Color::Gray;

pub const COLOR_PAUSED: Color = Color::Yellow;

/// Completed - green #04B575
pub const COLOR_COMPLETED: Color = Color::Rgb(4, 181, 117);

pub const COLOR_FAILED: Color = Color::Red;

/// Progress bar fill
pub const COLOR_PROGRESS: Color = Color::White;

/// Progress bar track
pub const COLOR_PROGRESS_BG: Color = Color::DarkGray;

// ============================================================================
// Row Actions
// ============================================================================

/// Destructive action background
pub const COLOR_DESTRUCTIVE_BG: Color = Color::Rgb(160, 30, 30);

/// Background for dialog-like panels (error and empty states)
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);

/// Color for a download state's status line.
pub fn state_color(state: &DownloadState) -> Color {
    match state {
        DownloadState::Queued => COLOR_QUEUED,
        DownloadState::Downloading { .. } => COLOR_ACTIVE,
        DownloadState::Paused { .. } => COLOR_PAUSED,
        DownloadState::Completed => COLOR_COMPLETED,
        DownloadState::Failed { .. } => COLOR_FAILED,
    }
}
