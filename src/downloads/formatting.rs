//! Text shown on download rows.

use chrono::NaiveDate;

use crate::models::DownloadState;

/// Row title for an asset, numbering episodes.
///
/// `"3. Title"` when numbered and titled, `"Episode 3"` when only numbered,
/// the title itself otherwise (or `"Episode"` when that is empty too).
pub fn episode_title(title: &str, episode_number: Option<u32>) -> String {
    match (episode_number, title.is_empty()) {
        (None, false) => title.to_string(),
        (None, true) => "Episode".to_string(),
        (Some(number), false) => format!("{}. {}", number, title),
        (Some(number), true) => format!("Episode {}", number),
    }
}

/// `"1 h 05 min"`, `"42 min"`, `"< 1 min"`; `None` when unknown.
pub fn format_duration(duration_secs: Option<u64>) -> Option<String> {
    let secs = duration_secs.filter(|s| *s > 0)?;
    if secs < 60 {
        return Some("< 1 min".to_string());
    }
    let minutes = secs / 60;
    let hours = minutes / 60;
    if hours > 0 {
        Some(format!("{} h {:02} min", hours, minutes % 60))
    } else {
        Some(format!("{} min", minutes))
    }
}

/// Status line for a download state.
pub fn status_line(state: &DownloadState) -> String {
    match state {
        DownloadState::Queued => "Queued".to_string(),
        DownloadState::Downloading { .. } => {
            format!("Downloading {}%", state.percent().unwrap_or(0))
        }
        DownloadState::Paused { .. } => format!("Paused at {}%", state.percent().unwrap_or(0)),
        DownloadState::Completed => "Downloaded".to_string(),
        DownloadState::Failed { reason } => format!("Failed: {}", reason),
    }
}

/// Human-readable size using binary units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{:.0} {}", value, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

pub fn format_release_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}
