//! Recording analytics sink for testing.

use std::cell::RefCell;

use crate::traits::ScreenAnalytics;

#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    screens: RefCell<Vec<String>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen names reported so far.
    pub fn screens(&self) -> Vec<String> {
        self.screens.borrow().clone()
    }
}

impl ScreenAnalytics for RecordingAnalytics {
    fn report_screen_opened(&self, screen_name: &str) {
        self.screens.borrow_mut().push(screen_name.to_string());
    }
}
