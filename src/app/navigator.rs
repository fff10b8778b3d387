// SPDX-License-Identifier: MPL-2.0
//! Navigation history.
//!
//! The navigator is an owned value handed by reference to whoever triggers a
//! transition. It starts at [`Screen::Home`], which can never be popped.

use super::Screen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    /// Bottom entry is always the start destination.
    history: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            history: vec![Screen::Home],
        }
    }

    /// The active screen.
    #[must_use]
    pub fn current(&self) -> &Screen {
        // history is never empty: navigate_back keeps the root entry
        &self.history[self.history.len() - 1]
    }

    /// Number of entries on the back stack, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Pushes `screen` on top of the history.
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(route = %screen.route(), "navigate");
        self.history.push(screen);
    }

    /// Pops to the previous entry.
    ///
    /// Returns `false` (and does nothing) at the root.
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        if let Some(left) = self.history.pop() {
            tracing::debug!(from = %left.route(), to = %self.current().route(), "navigate back");
        }
        true
    }

    /// Navigates to a top-level destination from the bottom bar.
    ///
    /// Pops everything above the start destination, then pushes `screen`
    /// unless it already is the top entry (single-top).
    pub fn navigate_top_level(&mut self, screen: Screen) {
        self.history.truncate(1);
        if *self.current() != screen {
            self.history.push(screen);
        }
    }

    /// Whether the bottom navigation bar is visible.
    #[must_use]
    pub fn shows_bottom_bar(&self) -> bool {
        self.current().shows_bottom_bar()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ImageLocator;

    fn result_screen() -> Screen {
        Screen::ResultDetection {
            locator: ImageLocator::parse("file:///tmp/1.jpg").unwrap(),
        }
    }

    #[test]
    fn starts_at_home_with_bottom_bar() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), &Screen::Home);
        assert!(nav.shows_bottom_bar());
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn back_at_home_is_noop() {
        let mut nav = Navigator::new();
        assert!(!nav.navigate_back());
        assert_eq!(nav.current(), &Screen::Home);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn back_from_result_returns_to_camera_then_home() {
        let mut nav = Navigator::new();
        nav.navigate_to(Screen::Camera);
        nav.navigate_to(result_screen());
        assert!(!nav.shows_bottom_bar());

        assert!(nav.navigate_back());
        assert_eq!(nav.current(), &Screen::Camera);
        assert!(nav.navigate_back());
        assert_eq!(nav.current(), &Screen::Home);
        assert!(nav.shows_bottom_bar());
    }

    #[test]
    fn top_level_navigation_resets_history() {
        let mut nav = Navigator::new();
        nav.navigate_to(Screen::Camera);
        nav.navigate_to(result_screen());

        nav.navigate_top_level(Screen::Home);

        assert_eq!(nav.current(), &Screen::Home);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn top_level_navigation_is_single_top() {
        let mut nav = Navigator::new();
        nav.navigate_top_level(Screen::Home);
        nav.navigate_top_level(Screen::Home);
        assert_eq!(nav.depth(), 1);
    }
}
