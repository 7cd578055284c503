//! Pure mapping from [`FetchState`] to what the screen shows.
//!
//! [`page`] builds a [`Page`] tree without touching the terminal;
//! [`draw`] lays that tree out with ratatui.

mod card;
mod ui;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub use card::{MovieCard, format_rating};
pub use ui::{CARD_WIDTH, GridMetrics, draw};

use crate::fetcher::FetchState;

/// Application title shown in every state.
pub const APP_TITLE: &str = "Movie Picture Pipeline";

/// Header text while a request is in flight.
pub const LOADING_TEXT: &str = "Loading movies...";

/// Header subtitle once movies are loaded.
pub const SUBTITLE: &str = "Discover amazing movies from our collection";

/// Label of the retry control.
pub const RETRY_LABEL: &str = "Retry";

/// Main area content.
#[derive(Debug)]
pub enum Body<'a> {
    /// Nothing below the header.
    Empty,
    /// Error panel with a retry control.
    Failure {
        /// User-facing failure message.
        message: &'a str,
    },
    /// One card per movie, in server order.
    Grid(Vec<MovieCard<'a>>),
}

/// Rendered tree for one frame.
#[derive(Debug)]
pub struct Page<'a> {
    /// Header lines (title first).
    pub header: Vec<Line<'a>>,
    /// Main area.
    pub body: Body<'a>,
    /// Summary footer, present only with loaded movies.
    pub footer: Option<Line<'a>>,
}

impl Page<'_> {
    /// Flattens the page into plain text, one line per row.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out: Vec<String> = self.header.iter().map(line_text).collect();
        match &self.body {
            Body::Empty => {}
            Body::Failure { message } => {
                out.push(String::from(*message));
                out.push(retry_button_text());
            }
            Body::Grid(cards) => {
                for card in cards {
                    out.extend(card.lines().iter().map(line_text));
                }
            }
        }
        if let Some(footer) = &self.footer {
            out.push(line_text(footer));
        }
        out.join("\n")
    }
}

/// Builds the page for `state`.
///
/// `api_url` is the configured backend base URL and is shown verbatim.
#[must_use]
pub fn page<'a>(state: &'a FetchState, api_url: &'a str) -> Page<'a> {
    let title = Line::from(Span::styled(
        APP_TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    match state {
        FetchState::Loading => Page {
            header: vec![title, Line::from(LOADING_TEXT)],
            body: Body::Empty,
            footer: None,
        },
        FetchState::Failure { message } => Page {
            header: vec![title],
            body: Body::Failure {
                message: message.as_str(),
            },
            footer: None,
        },
        FetchState::Success { movies } => Page {
            header: vec![
                title,
                Line::from(SUBTITLE),
                Line::from(vec![
                    Span::styled("API URL: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(api_url, Style::default().fg(Color::DarkGray)),
                ]),
            ],
            body: Body::Grid(movies.iter().map(MovieCard::new).collect()),
            footer: Some(Line::from(format!("Total Movies: {}", movies.len()))),
        },
    }
}

/// Text of the retry control.
pub(crate) fn retry_button_text() -> String {
    format!("[ {RETRY_LABEL} ]")
}

/// Concatenates the span contents of a line.
pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::panic)]

    use moviepipe_api::Movie;

    use super::*;
    use crate::fetcher::FAILURE_MESSAGE;

    const DEFAULT_URL: &str = "http://localhost:5000";

    fn movie(id: i64, title: &str, genre: &str, rating: f64) -> Movie {
        Movie {
            id,
            title: String::from(title),
            year: 2023,
            director: format!("Director {id}"),
            genre: String::from(genre),
            rating,
            description: format!("Description {id}"),
        }
    }

    fn success(movies: Vec<Movie>) -> FetchState {
        FetchState::Success { movies }
    }

    #[test]
    fn test_loading_page() {
        // Arrange & Act
        let state = FetchState::Loading;
        let page = page(&state, DEFAULT_URL);

        // Assert
        assert_eq!(page.plain_text(), "Movie Picture Pipeline\nLoading movies...");
        assert!(matches!(page.body, Body::Empty));
        assert!(page.footer.is_none());
    }

    #[test]
    fn test_failure_page() {
        // Arrange
        let state = FetchState::Failure {
            message: String::from(FAILURE_MESSAGE),
        };

        // Act
        let text = page(&state, DEFAULT_URL).plain_text();

        // Assert
        assert!(text.contains("Failed to fetch movies. Please check if the backend is running."));
        assert!(text.contains("Retry"));
        assert!(!text.contains("Loading movies..."));
        assert!(!text.contains("Total Movies"));
    }

    #[test]
    fn test_success_page_single_movie() {
        // Arrange
        let state = success(vec![Movie {
            id: 1,
            title: String::from("Test Movie"),
            year: 2023,
            director: String::from("Test Director"),
            genre: String::from("Action"),
            rating: 8.5,
            description: String::from("A test movie description"),
        }]);

        // Act
        let text = page(&state, DEFAULT_URL).plain_text();

        // Assert
        assert!(text.contains("Test Movie"));
        assert!(text.contains("Test Director"));
        assert!(text.contains("Action"));
        assert!(text.contains("\u{2b50} 8.5/10"));
        assert!(text.contains(SUBTITLE));
        assert!(text.contains("Total Movies: 1"));
        assert!(!text.contains("Loading movies..."));
    }

    #[test]
    fn test_total_count_footer() {
        for n in [0_i64, 1, 2, 5] {
            // Arrange
            let movies = (1..=n).map(|id| movie(id, "M", "Drama", 7.5)).collect();
            let state = success(movies);

            // Act
            let page = page(&state, DEFAULT_URL);

            // Assert
            let footer = page.footer.as_ref().map(line_text).unwrap();
            assert_eq!(footer, format!("Total Movies: {n}"));
        }
    }

    #[test]
    fn test_cards_follow_payload_order() {
        // Arrange
        let state = success(vec![
            movie(5, "Five", "Crime", 8.9),
            movie(2, "Two", "Crime", 9.2),
            movie(9, "Nine", "Sci-Fi", 8.7),
        ]);

        // Act
        let page = page(&state, DEFAULT_URL);

        // Assert
        let Body::Grid(cards) = &page.body else {
            panic!("expected grid");
        };
        let keys: Vec<i64> = cards.iter().map(MovieCard::key).collect();
        assert_eq!(keys, vec![5, 2, 9]);
        let text = page.plain_text();
        let five = text.find("Five").unwrap();
        let two = text.find("Two").unwrap();
        let nine = text.find("Nine").unwrap();
        assert!(five < two && two < nine);
    }

    #[test]
    fn test_api_url_is_shown_verbatim() {
        for url in [DEFAULT_URL, "https://movies.example.com/backend/"] {
            // Arrange
            let state = success(Vec::new());

            // Act
            let page = page(&state, url);

            // Assert
            assert_eq!(line_text(&page.header[2]), format!("API URL: {url}"));
        }
    }

    #[test]
    fn test_api_url_hidden_outside_success() {
        // Arrange
        let loading = FetchState::Loading;
        let failure = FetchState::Failure {
            message: String::from(FAILURE_MESSAGE),
        };

        // Act & Assert
        assert!(!page(&loading, DEFAULT_URL).plain_text().contains("API URL"));
        assert!(!page(&failure, DEFAULT_URL).plain_text().contains("API URL"));
    }
}
