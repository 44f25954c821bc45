//! UI rendering for reel
//!
//! - [`list_surface::ListSurface`] - the list widget table adapters drive
//! - [`cells`] - download item and series header rows
//! - [`downloads_view`] - screen chrome, loading, empty and error states

pub mod cells;
pub mod downloads_view;
pub mod helpers;
pub mod list_surface;
pub mod theme;

use ratatui::Frame;

use crate::app::App;

// Re-export theme colors for external use
pub use theme::{
    state_color, COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_COMPLETED, COLOR_DIM,
    COLOR_FAILED, COLOR_HEADER, COLOR_PAUSED, COLOR_PROGRESS, COLOR_QUEUED,
};

pub use list_surface::{ActionChip, ListSurface};

/// Render the visible screen.
pub fn render(frame: &mut Frame, app: &App) {
    downloads_view::render_downloads(frame, app);
}
