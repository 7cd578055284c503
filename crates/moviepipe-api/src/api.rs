//! `MoviesApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{HealthStatus, Movie};

/// Movie Picture Pipeline backend trait.
///
/// Abstracts backend operations for fake substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait;
/// implement `MoviesApi` and `LocalMoviesApi` comes for free.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MoviesApi: Send)]
pub trait LocalMoviesApi {
    /// Fetches the full movie collection (`GET /api/movies`) in server order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a body
    /// without a well-typed `movies` field.
    async fn list_movies(&self) -> Result<Vec<Movie>>;

    /// Fetches a single movie by ID (`GET /api/movies/<id>`).
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status (including 404),
    /// or JSON decoding failure.
    async fn movie(&self, id: i64) -> Result<Movie>;

    /// Queries the backend health endpoint (`GET /health`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn health(&self) -> Result<HealthStatus>;
}
