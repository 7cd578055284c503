//! Movie collection fetch lifecycle.
//!
//! [`DataFetcher`] owns the [`FetchState`] and is the only thing that
//! mutates it. Each `start()` bumps a request generation; a finished
//! request reports back tagged with the generation it was issued under,
//! and [`DataFetcher::apply`] drops anything that is no longer current.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use moviepipe_api::{Movie, MoviesApi};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

/// User-facing text shown for every kind of fetch failure.
pub const FAILURE_MESSAGE: &str = "Failed to fetch movies. Please check if the backend is running.";

/// Result of the most recent fetch attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// A request is in flight.
    Loading,
    /// The last request returned these movies, in server order.
    Success {
        /// Movies as received.
        movies: Vec<Movie>,
    },
    /// The last request failed.
    Failure {
        /// User-facing message (always [`FAILURE_MESSAGE`]).
        message: String,
    },
}

/// A finished request, not yet committed to the state.
#[derive(Debug)]
pub struct Completion {
    /// Generation the request was issued under.
    generation: u64,
    /// What the backend returned.
    outcome: Result<Vec<Movie>>,
}

/// Drives [`FetchState`] transitions around the movie collection request.
#[derive(Debug)]
pub struct DataFetcher<A> {
    /// Backend used for every request.
    api: Arc<A>,
    /// Current state.
    state: FetchState,
    /// Generation of the most recently started request.
    generation: u64,
    /// Task running the current request, if any.
    in_flight: Option<JoinHandle<()>>,
    /// Handed to request tasks.
    tx: UnboundedSender<Completion>,
    /// Receives finished requests.
    rx: UnboundedReceiver<Completion>,
}

impl<A> DataFetcher<A>
where
    A: MoviesApi + Sync + 'static,
{
    /// Creates a fetcher in the `Loading` state. No request is issued until
    /// [`start`](Self::start) is called.
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            api,
            state: FetchState::Loading,
            generation: 0,
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &FetchState {
        &self.state
    }

    /// Returns the generation of the most recently started request.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Enters `Loading` and issues a new request for the movie collection.
    ///
    /// Any request still in flight is superseded: its task is aborted and,
    /// should it have finished already, its completion is ignored by
    /// [`apply`](Self::apply).
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        self.generation = self.generation.wrapping_add(1);
        self.state = FetchState::Loading;

        let generation = self.generation;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tracing::debug!(generation, "requesting movie collection");

        self.in_flight = Some(tokio::spawn(async move {
            let outcome = api.list_movies().await;
            // The receiver lives as long as the fetcher; a send error only
            // means the fetcher is gone.
            let _ = tx.send(Completion {
                generation,
                outcome,
            });
        }));
    }

    /// Same as [`start`](Self::start).
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn retry(&mut self) {
        tracing::info!(previous_generation = self.generation, "retrying movie fetch");
        self.start();
    }

    /// Waits for the next finished request.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }

    /// Commits `completion` if it belongs to the latest request.
    ///
    /// Returns `true` when the state was replaced, `false` when the
    /// completion was stale and dropped.
    pub fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation {
            tracing::debug!(
                stale = completion.generation,
                current = self.generation,
                "discarding superseded fetch result"
            );
            return false;
        }
        self.in_flight = None;

        self.state = match completion.outcome {
            Ok(movies) => {
                let mut seen = HashSet::with_capacity(movies.len());
                if let Some(dup) = movies.iter().find(|m| !seen.insert(m.id)) {
                    tracing::warn!(id = dup.id, "duplicate movie id in response");
                }
                tracing::info!(count = movies.len(), "movies loaded");
                FetchState::Success { movies }
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "error fetching movies");
                FetchState::Failure {
                    message: String::from(FAILURE_MESSAGE),
                }
            }
        };
        true
    }
}
