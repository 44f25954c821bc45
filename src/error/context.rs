//! Where an error happened, attached on its way up.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation that failed, e.g. `load_downloads`.
    pub operation: String,
    /// Analytics name of the screen that issued it.
    pub screen: Option<String>,
    pub component: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            screen: None,
            component: None,
        }
    }

    pub fn with_screen(mut self, screen: impl Into<String>) -> Self {
        self.screen = Some(screen.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.operation)?;
        if let Some(screen) = &self.screen {
            write!(f, " screen={}", screen)?;
        }
        if let Some(component) = &self.component {
            write!(f, " in {}", component)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        assert_eq!(ErrorContext::new("load").to_string(), "[load]");

        let ctx = ErrorContext::new("load_downloads")
            .with_screen("DownloadsView")
            .with_component("presenter");
        assert_eq!(
            ctx.to_string(),
            "[load_downloads] screen=DownloadsView in presenter"
        );
    }
}
