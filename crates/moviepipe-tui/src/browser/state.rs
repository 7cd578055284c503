//! Browser UI state and key handling.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::fetcher::FetchState;
use crate::view::GridMetrics;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    None,
    /// Leave the browser.
    Quit,
    /// Issue a new fetch.
    Retry,
}

/// Screen state owned by the browser (the fetch state lives in the fetcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    /// Backend base URL shown in the header.
    pub api_url: String,
    /// First visible card row.
    pub scroll: usize,
    /// Largest scroll offset from the last draw.
    pub max_scroll: usize,
    /// Card rows per screen from the last draw.
    pub page_rows: usize,
}

impl BrowserState {
    /// Creates state scrolled to the top.
    #[must_use]
    pub const fn new(api_url: String) -> Self {
        Self {
            api_url,
            scroll: 0,
            max_scroll: 0,
            page_rows: 1,
        }
    }

    /// Records the geometry of the last draw and clamps the scroll offset.
    pub fn set_metrics(&mut self, metrics: GridMetrics) {
        self.max_scroll = metrics.max_scroll;
        self.page_rows = metrics.visible_rows.max(1);
        self.scroll = self.scroll.min(self.max_scroll);
    }

    /// Scrolls down by `rows`, stopping at the last row.
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll);
    }

    /// Scrolls up by `rows`, stopping at the top.
    pub const fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    /// Returns to the first row.
    pub const fn reset_scroll(&mut self) {
        self.scroll = 0;
    }
}

/// Maps a key press to an [`Action`], updating scroll position as needed.
///
/// Retry is only honoured while the failure panel is shown; scrolling only
/// while movies are loaded.
pub fn handle_key(
    state: &FetchState,
    browser: &mut BrowserState,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Action::Quit,
        KeyCode::Char('r') | KeyCode::Enter => {
            if matches!(state, FetchState::Failure { .. }) {
                return Action::Retry;
            }
        }
        _ if !matches!(state, FetchState::Success { .. }) => {}
        KeyCode::Up | KeyCode::Char('k') => browser.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => browser.scroll_down(1),
        KeyCode::PageUp => browser.scroll_up(browser.page_rows),
        KeyCode::PageDown => browser.scroll_down(browser.page_rows),
        KeyCode::Home => browser.reset_scroll(),
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use moviepipe_api::Movie;

    use super::*;
    use crate::fetcher::FAILURE_MESSAGE;

    fn failure() -> FetchState {
        FetchState::Failure {
            message: String::from(FAILURE_MESSAGE),
        }
    }

    fn success() -> FetchState {
        FetchState::Success {
            movies: vec![Movie {
                id: 1,
                title: String::from("Test Movie"),
                year: 2023,
                director: String::from("Test Director"),
                genre: String::from("Action"),
                rating: 8.5,
                description: String::from("A test movie description"),
            }],
        }
    }

    fn scrollable() -> BrowserState {
        let mut browser = BrowserState::new(String::from("http://localhost:5000"));
        browser.set_metrics(GridMetrics {
            rows: 10,
            visible_rows: 3,
            max_scroll: 7,
        });
        browser
    }

    #[test]
    fn test_quit_keys() {
        // Arrange
        let mut browser = scrollable();

        // Act & Assert
        for state in [FetchState::Loading, failure(), success()] {
            assert_eq!(
                handle_key(&state, &mut browser, KeyCode::Char('q'), KeyModifiers::NONE),
                Action::Quit
            );
            assert_eq!(
                handle_key(&state, &mut browser, KeyCode::Esc, KeyModifiers::NONE),
                Action::Quit
            );
            assert_eq!(
                handle_key(&state, &mut browser, KeyCode::Char('c'), KeyModifiers::CONTROL),
                Action::Quit
            );
        }
    }

    #[test]
    fn test_plain_c_does_not_quit() {
        // Arrange
        let mut browser = scrollable();

        // Act
        let action = handle_key(&success(), &mut browser, KeyCode::Char('c'), KeyModifiers::NONE);

        // Assert
        assert_eq!(action, Action::None);
    }

    #[test]
    fn test_retry_only_in_failure() {
        // Arrange
        let mut browser = scrollable();

        // Act & Assert
        assert_eq!(
            handle_key(&failure(), &mut browser, KeyCode::Char('r'), KeyModifiers::NONE),
            Action::Retry
        );
        assert_eq!(
            handle_key(&failure(), &mut browser, KeyCode::Enter, KeyModifiers::NONE),
            Action::Retry
        );
        assert_eq!(
            handle_key(&FetchState::Loading, &mut browser, KeyCode::Char('r'), KeyModifiers::NONE),
            Action::None
        );
        assert_eq!(
            handle_key(&success(), &mut browser, KeyCode::Enter, KeyModifiers::NONE),
            Action::None
        );
    }

    #[test]
    fn test_scroll_keys() {
        // Arrange
        let mut browser = scrollable();
        let state = success();

        // Act & Assert
        handle_key(&state, &mut browser, KeyCode::Down, KeyModifiers::NONE);
        handle_key(&state, &mut browser, KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(browser.scroll, 2);

        handle_key(&state, &mut browser, KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(browser.scroll, 1);

        handle_key(&state, &mut browser, KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(browser.scroll, 4);

        handle_key(&state, &mut browser, KeyCode::PageDown, KeyModifiers::NONE);
        handle_key(&state, &mut browser, KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(browser.scroll, 7); // clamped at max_scroll

        handle_key(&state, &mut browser, KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(browser.scroll, 4);

        handle_key(&state, &mut browser, KeyCode::Home, KeyModifiers::NONE);
        assert_eq!(browser.scroll, 0);

        handle_key(&state, &mut browser, KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(browser.scroll, 0);
    }

    #[test]
    fn test_scroll_ignored_outside_success() {
        // Arrange
        let mut browser = scrollable();

        // Act
        handle_key(&failure(), &mut browser, KeyCode::Down, KeyModifiers::NONE);
        handle_key(&FetchState::Loading, &mut browser, KeyCode::PageDown, KeyModifiers::NONE);

        // Assert
        assert_eq!(browser.scroll, 0);
    }

    #[test]
    fn test_set_metrics_clamps_scroll() {
        // Arrange
        let mut browser = scrollable();
        browser.scroll = 7;

        // Act
        browser.set_metrics(GridMetrics {
            rows: 4,
            visible_rows: 2,
            max_scroll: 2,
        });

        // Assert
        assert_eq!(browser.scroll, 2);
        assert_eq!(browser.page_rows, 2);
    }
}
