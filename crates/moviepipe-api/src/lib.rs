//! Client library for the Movie Picture Pipeline backend.
//!
//! Handles HTTP requests to the backend's `/api/movies` and `/health`
//! endpoints and decodes the movie records they return.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMoviesApi, MoviesApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, MovieClient, MovieClientBuilder};
pub use types::{HealthStatus, Movie, MovieResponse, MoviesResponse};
