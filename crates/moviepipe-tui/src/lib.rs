//! Terminal UI for browsing the movie collection.
//!
//! - [`fetcher`]: fetch lifecycle and [`fetcher::FetchState`]
//! - [`view`]: pure page model and ratatui drawing
//! - [`browser`]: interactive event loop

/// Interactive movie browser.
pub mod browser;
/// Movie collection fetch lifecycle.
pub mod fetcher;
/// Page model and drawing.
pub mod view;

pub use browser::run_browser;
