//! Movie card widget.

use moviepipe_api::Movie;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

/// Star shown in front of the rating.
const STAR: &str = "\u{2b50}";

/// Formats a rating for display.
///
/// Whole numbers get one decimal (`8` -> `"8.0"`); anything else is shown
/// exactly as carried (`8.5` -> `"8.5"`, `9.25` -> `"9.25"`).
#[must_use]
pub fn format_rating(rating: f64) -> String {
    if rating.is_finite() && rating.fract() == 0.0 {
        format!("{rating:.1}")
    } else {
        format!("{rating}")
    }
}

/// Stateless card presenting one movie.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieCard<'a> {
    movie: &'a Movie,
}

impl<'a> MovieCard<'a> {
    /// Creates a card for `movie`.
    #[must_use]
    pub const fn new(movie: &'a Movie) -> Self {
        Self { movie }
    }

    /// Identity of the card (the movie ID).
    #[must_use]
    pub const fn key(&self) -> i64 {
        self.movie.id
    }

    /// Rating label, e.g. `"⭐ 8.5/10"`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{STAR} {}/10", format_rating(self.movie.rating))
    }

    /// Text lines of the card, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<Line<'a>> {
        let label = Style::default().add_modifier(Modifier::BOLD);
        let movie = self.movie;
        vec![
            Line::from(vec![
                Span::styled(
                    movie.title.as_str(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(format!("({})", movie.year), Style::default().fg(Color::Gray)),
            ]),
            Line::from(vec![
                Span::styled("Director: ", label),
                Span::raw(movie.director.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Genre: ", label),
                Span::raw(movie.genre.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Rating: ", label),
                Span::styled(self.rating_label(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(Span::styled(
                movie.description.as_str(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ]
    }

    /// Rows needed to show the whole card, borders included, at `width` columns.
    #[must_use]
    pub fn height(&self, width: u16) -> u16 {
        let text_rows = self.text().line_count(width.saturating_sub(2));
        u16::try_from(text_rows)
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    }

    /// Wrapped card text without the border.
    fn text(&self) -> Paragraph<'a> {
        Paragraph::new(self.lines()).wrap(Wrap { trim: true })
    }
}

impl Widget for &MovieCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.text()
            .block(Block::bordered().border_style(Style::default().fg(Color::Cyan)))
            .render(area, buf);
    }
}
