//! Recording navigator for testing.

use std::cell::RefCell;

use crate::traits::{Destination, Navigator};

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    destinations: RefCell<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destinations(&self) -> Vec<Destination> {
        self.destinations.borrow().clone()
    }

    pub fn last(&self) -> Option<Destination> {
        self.destinations.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: Destination) {
        self.destinations.borrow_mut().push(destination);
    }
}
