//! ratatui layout for a [`Page`].

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use super::card::MovieCard;
use super::{Body, Page, retry_button_text};

/// Width of one card cell in the grid.
pub const CARD_WIDTH: u16 = 44;

/// Grid geometry from the last draw, used to bound scrolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridMetrics {
    /// Card rows needed for all movies.
    pub rows: usize,
    /// Card rows fully visible from the current scroll offset (at least 1).
    pub visible_rows: usize,
    /// Largest scroll offset, in card rows; from there the last row is on screen.
    pub max_scroll: usize,
}

/// Number of leading `heights` that fit in `available` rows (at least 1).
fn rows_that_fit<'h>(heights: impl Iterator<Item = &'h u16>, available: u16) -> usize {
    let mut used: u16 = 0;
    let mut count: usize = 0;
    for height in heights {
        used = used.saturating_add(*height);
        if used > available {
            break;
        }
        count = count.saturating_add(1);
    }
    count.max(1)
}

/// Computes scroll bounds for card rows of `heights` in `available` screen rows.
fn grid_metrics(heights: &[u16], available: u16, scroll: usize) -> GridMetrics {
    let rows = heights.len();
    let max_scroll = rows.saturating_sub(rows_that_fit(heights.iter().rev(), available));
    let first_row = scroll.min(max_scroll);

    GridMetrics {
        rows,
        visible_rows: rows_that_fit(heights.iter().skip(first_row), available),
        max_scroll,
    }
}

/// Draws `page`, starting the grid at card row `scroll`.
///
/// Returns the grid geometry (zeroed when no grid is shown).
pub fn draw(frame: &mut Frame, page: &Page<'_>, scroll: usize) -> GridMetrics {
    let header_height = u16::try_from(page.header.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let footer_height = if page.footer.is_some() { 3 } else { 0 };

    let [header_area, body_area, footer_area, hint_area] = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Min(3),
        Constraint::Length(footer_height),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let header = Paragraph::new(page.header.clone())
        .alignment(Alignment::Center)
        .block(Block::bordered());
    frame.render_widget(header, header_area);

    let metrics = match &page.body {
        Body::Empty => GridMetrics::default(),
        Body::Failure { message } => {
            draw_failure(frame, body_area, message);
            GridMetrics::default()
        }
        Body::Grid(cards) => draw_grid(frame, body_area, cards, scroll),
    };

    if let Some(footer) = &page.footer {
        let footer = Paragraph::new(footer.clone())
            .alignment(Alignment::Center)
            .block(Block::bordered());
        frame.render_widget(footer, footer_area);
    }

    let hint = Paragraph::new(key_hint(&page.body)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, hint_area);

    metrics
}

/// Draws the error panel with its retry control.
fn draw_failure(frame: &mut Frame, area: Rect, message: &str) {
    let red = Style::default().fg(Color::Red);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, red)),
        Line::from(""),
        Line::from(Span::styled(
            retry_button_text(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().border_style(red).title(" Error "));
    frame.render_widget(panel, area);
}

/// Draws the card grid. Cards fill rows left to right in payload order.
#[allow(clippy::arithmetic_side_effects)]
fn draw_grid(frame: &mut Frame, area: Rect, cards: &[MovieCard<'_>], scroll: usize) -> GridMetrics {
    let block = Block::bordered().title(" Movies ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if cards.is_empty() {
        let empty = Paragraph::new("No movies in the collection.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return GridMetrics::default();
    }

    let columns = usize::from((inner.width / CARD_WIDTH).max(1));
    let ratio = u32::try_from(columns).unwrap_or(1);
    let cells = Layout::horizontal(vec![Constraint::Ratio(1, ratio); columns]).split(inner);

    let rows: Vec<&[MovieCard<'_>]> = cards.chunks(columns).collect();
    let heights: Vec<u16> = rows
        .iter()
        .map(|row| {
            cells
                .iter()
                .zip(*row)
                .map(|(cell, card)| card.height(cell.width))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let metrics = grid_metrics(&heights, inner.height, scroll);
    let first_row = scroll.min(metrics.max_scroll);

    let mut y = inner.y;
    for (row, height) in rows.iter().zip(&heights).skip(first_row) {
        if y >= inner.bottom() {
            break;
        }
        // Last row may be clipped.
        let shown = (*height).min(inner.bottom() - y);
        for (cell, card) in cells.iter().zip(*row) {
            frame.render_widget(card, Rect::new(cell.x, y, cell.width, shown));
        }
        y = y.saturating_add(*height);
    }

    metrics
}

/// Key bindings available for the current body.
const fn key_hint(body: &Body<'_>) -> &'static str {
    match body {
        Body::Empty => " q: quit",
        Body::Failure { .. } => " r/Enter: retry  q: quit",
        Body::Grid(_) => " \u{2191}\u{2193}/j/k: scroll  PgUp/PgDn: page  Home: top  q: quit",
    }
}
