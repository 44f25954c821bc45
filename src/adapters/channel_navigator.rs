//! Navigator that hands destinations to the app loop.

use tokio::sync::mpsc;
use tracing::warn;

use crate::app::AppMessage;
use crate::traits::{Destination, Navigator};

/// Posts every destination as [`AppMessage::Navigate`].
///
/// Navigation requested from inside an adapter callback is acted on by the
/// app loop after the callback returns, never re-entrantly.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl ChannelNavigator {
    pub fn new(message_tx: mpsc::UnboundedSender<AppMessage>) -> Self {
        Self { message_tx }
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, destination: Destination) {
        if let Err(e) = self.message_tx.send(AppMessage::Navigate(destination)) {
            warn!("navigation dropped, app loop gone: {:?}", e.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_posts_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let navigator = ChannelNavigator::new(tx);

        navigator.navigate(Destination::Showcase);

        match rx.try_recv() {
            Ok(AppMessage::Navigate(Destination::Showcase)) => {}
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_navigate_after_receiver_dropped_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        ChannelNavigator::new(tx).navigate(Destination::Showcase);
    }
}
