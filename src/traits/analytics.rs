/// Screen-level analytics sink.
pub trait ScreenAnalytics {
    fn report_screen_opened(&self, screen_name: &str);
}
