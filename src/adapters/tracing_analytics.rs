//! Screen analytics written to the log.

use tracing::info;

use crate::traits::ScreenAnalytics;

/// Reports screen opens as `tracing` events under the `analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl TracingAnalytics {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenAnalytics for TracingAnalytics {
    fn report_screen_opened(&self, screen_name: &str) {
        info!(target: "analytics", screen = screen_name, "screen opened");
    }
}
