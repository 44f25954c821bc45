//! Screen stack management for the App.

use tracing::{debug, info};

use crate::downloads::{DownloadsScope, DownloadsScreen, LoadJob, ScreenId};
use crate::ui::list_surface::ListSurface;

use super::{App, AppMessage};

impl App {
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// The visible screen.
    pub fn active_screen(&self) -> Option<&DownloadsScreen<ListSurface>> {
        self.screens.last()
    }

    pub fn active_screen_mut(&mut self) -> Option<&mut DownloadsScreen<ListSurface>> {
        self.screens.last_mut()
    }

    /// Open a new screen for `scope` on top of the stack and start its load.
    pub fn push_screen(&mut self, scope: DownloadsScope) {
        let mut screen = DownloadsScreen::new(scope, ListSurface::new(), self.context.clone());
        let job = screen.open();
        let id = screen.id();
        self.screens.push(screen);
        self.spawn_load(id, job);
        self.mark_dirty();
    }

    /// Close the visible screen and refresh the one below, whose rows may
    /// have changed meanwhile. The root screen is never popped.
    pub fn pop_screen(&mut self) -> bool {
        if self.screens.len() <= 1 {
            return false;
        }
        if let Some(closed) = self.screens.pop() {
            info!(screen = closed.scope().screen_name(), "closed screen");
        }
        if let Some(parent) = self.screens.last_mut() {
            let id = parent.id();
            let job = parent.refresh();
            self.spawn_load(id, job);
        }
        self.mark_dirty();
        true
    }

    /// Reload every open screen from the store.
    pub fn refresh_all(&mut self) {
        let jobs: Vec<(ScreenId, LoadJob)> = self
            .screens
            .iter_mut()
            .map(|screen| (screen.id(), screen.refresh()))
            .collect();
        for (id, job) in jobs {
            self.spawn_load(id, job);
        }
        self.mark_dirty();
    }

    /// Run `job` on the blocking pool; the outcome comes back as a message.
    pub(super) fn spawn_load(&self, screen: ScreenId, job: LoadJob) {
        debug!(%screen, generation = job.generation(), "spawning downloads load");
        let tx = self.message_tx.clone();
        job.spawn(move |outcome| {
            let _ = tx.send(AppMessage::DownloadsLoaded { screen, outcome });
        });
    }
}
