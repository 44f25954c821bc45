//! Keyboard handling for the App.
//!
//! | Key | Action |
//! |-----|--------|
//! | `q`, `Ctrl+C` | quit |
//! | `↑`/`k`, `↓`/`j`, `PgUp`, `PgDn`, `Home`/`g`, `End`/`G` | move |
//! | `Enter` | open or play; browse the showcase when empty; retry on error |
//! | `d`, `Delete`, `←` | reveal the delete action, press again to confirm |
//! | `→` | hide the revealed action |
//! | `Esc` | hide the revealed action, else back |
//! | `r` | retry on error, else reload |
//! | `.` | repeat the last selection |

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::downloads::ScreenState;

use super::App;

/// Rows moved by page up / page down.
const PAGE_ROWS: isize = 5;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => self.back(),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-PAGE_ROWS),
            KeyCode::PageDown => self.move_cursor(PAGE_ROWS),
            KeyCode::Home | KeyCode::Char('g') => {
                if let Some(screen) = self.active_screen() {
                    screen.surface().borrow_mut().move_to_first();
                }
            }
            KeyCode::End | KeyCode::Char('G') => {
                if let Some(screen) = self.active_screen() {
                    screen.surface().borrow_mut().move_to_last();
                }
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Char('d') | KeyCode::Delete | KeyCode::Left => self.delete_or_reveal(),
            KeyCode::Right => {
                if let Some(screen) = self.active_screen() {
                    screen.surface().borrow_mut().hide_actions();
                }
            }
            KeyCode::Char('r') => self.retry_or_refresh(),
            KeyCode::Char('.') => {
                if let Some(screen) = self.active_screen_mut() {
                    screen.repeat_last_selection();
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if let Some(screen) = self.active_screen() {
            screen.surface().borrow_mut().move_cursor(delta);
        }
    }

    fn back(&mut self) {
        let hid_actions = match self.active_screen() {
            Some(screen) => {
                let mut surface = screen.surface().borrow_mut();
                let revealed = surface.revealed().is_some();
                surface.hide_actions();
                revealed
            }
            None => false,
        };
        if !hid_actions {
            self.pop_screen();
        }
    }

    fn activate(&mut self) {
        let Some(screen) = self.screens.last_mut() else {
            return;
        };
        let state = screen.state().clone();
        match state {
            ScreenState::Success => {
                let cursor = screen.surface().borrow().cursor();
                if let Some(at) = cursor {
                    screen.select(at);
                }
            }
            ScreenState::Empty => screen.empty_state_action(),
            ScreenState::Error { retryable: true, .. } => self.retry_or_refresh(),
            ScreenState::Error { .. } | ScreenState::Loading => {}
        }
    }

    fn delete_or_reveal(&mut self) {
        let Some(screen) = self.screens.last_mut() else {
            return;
        };
        if *screen.state() != ScreenState::Success {
            return;
        }
        let (cursor, revealed) = {
            let surface = screen.surface().borrow();
            (surface.cursor(), surface.revealed())
        };
        match cursor {
            Some(at) if revealed == Some(at) => screen.delete(at),
            Some(_) => screen.surface().borrow_mut().reveal_actions(),
            None => {}
        }
    }

    fn retry_or_refresh(&mut self) {
        let Some(screen) = self.screens.last_mut() else {
            return;
        };
        let id = screen.id();
        let state = screen.state().clone();
        let job = match state {
            ScreenState::Error { .. } => screen.retry(),
            ScreenState::Loading => None,
            ScreenState::Empty | ScreenState::Success => Some(screen.refresh()),
        };
        if let Some(job) = job {
            self.spawn_load(id, job);
        }
    }
}
