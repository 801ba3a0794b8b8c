use std::time::Instant;

use crate::config::AppConfig;
use crate::hit::{self, FixedControl, Region, CONTROL_REGIONS};
use crate::navigation::{NavigationController, Outcome, ViewMode};

/// Transient message shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

/// Main application state.
pub struct App {
    pub nav: NavigationController,
    pub should_quit: bool,
    pub status_message: Option<StatusMessage>,
    /// First visible row of whichever view is active.
    pub scroll_offset: usize,
    pub use_icons: bool,
    pub recursive_display_limit: usize,
    /// Fixed controls drawn in the last frame.
    pub controls: Vec<(FixedControl, Region)>,
}

impl App {
    pub fn new(nav: NavigationController, config: &AppConfig) -> Self {
        Self {
            nav,
            should_quit: false,
            status_message: None,
            scroll_offset: 0,
            use_icons: config.use_icons(),
            recursive_display_limit: config.recursive_display_limit(),
            controls: CONTROL_REGIONS.to_vec(),
        }
    }

    /// Hit-test a click against the last rendered frame and act on it.
    pub fn click(&mut self, x: u16, y: u16) {
        let target = hit::resolve(x, y, &self.controls, self.nav.clickable_entries());
        log::debug!("click at ({x}, {y}) -> {target:?}");

        match self.nav.handle(target) {
            Ok(outcome) => self.apply_outcome(outcome),
            Err(e) => {
                log::error!("{e}");
                self.set_error_message(e.to_string());
            }
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Navigated(_) | Outcome::RecursiveHidden => self.scroll_offset = 0,
            Outcome::RecursiveShown(count) => {
                self.scroll_offset = 0;
                self.set_status_message(format!("Recursive view: {count} items"));
            }
            Outcome::Opened(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_status_message(format!("Opened {name}"));
            }
            Outcome::Ignored => {}
        }
    }

    /// Number of rows the active view can show.
    pub fn view_len(&self) -> usize {
        match self.nav.mode() {
            ViewMode::Flat => self.nav.entries().len(),
            ViewMode::Recursive => self
                .nav
                .recursive_lines()
                .len()
                .min(self.recursive_display_limit),
        }
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let max = self.view_len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + rows).min(max);
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn set_status_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: false,
            created: Instant::now(),
        });
    }

    pub fn set_error_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: true,
            created: Instant::now(),
        });
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some(ref msg) = self.status_message {
            if msg.created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
