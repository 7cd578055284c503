//! Interactive movie browser main loop.

mod state;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use moviepipe_api::MoviesApi;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub use state::{Action, BrowserState, handle_key};

use crate::fetcher::DataFetcher;
use crate::view;

/// Runs the movie browser until the user quits.
///
/// The collection is requested as soon as the browser is shown.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails. Fetch
/// failures are shown on screen and never returned.
pub async fn run_browser<A>(api: A, api_url: String) -> Result<()>
where
    A: MoviesApi + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut fetcher = DataFetcher::new(Arc::new(api));
    let mut browser = BrowserState::new(api_url);
    fetcher.start();

    let result = run_event_loop(&mut terminal, &mut fetcher, &mut browser).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop: redraw, then wait for a fetch completion or a key.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    fetcher: &mut DataFetcher<A>,
    browser: &mut BrowserState,
) -> Result<()>
where
    A: MoviesApi + Sync + 'static,
{
    let mut events = EventStream::new();

    loop {
        terminal
            .draw(|frame| {
                let metrics = view::draw(
                    frame,
                    &view::page(fetcher.state(), &browser.api_url),
                    browser.scroll,
                );
                browser.set_metrics(metrics);
            })
            .context("failed to draw TUI")?;

        tokio::select! {
            Some(completion) = fetcher.next_completion() => {
                if fetcher.apply(completion) {
                    browser.reset_scroll();
                }
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match handle_key(fetcher.state(), browser, key.code, key.modifiers) {
                        Action::Quit => return Ok(()),
                        Action::Retry => fetcher.retry(),
                        Action::None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("failed to read event"),
                None => return Ok(()),
            },
        }
    }
}
