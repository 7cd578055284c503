//! Movie Picture Pipeline response types.

use serde::{Deserialize, Serialize};

/// A single movie record as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique, stable identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Release year.
    pub year: i32,
    /// Director name.
    pub director: String,
    /// Genre label.
    pub genre: String,
    /// Rating on a 0-10 scale.
    pub rating: f64,
    /// Free-text synopsis.
    pub description: String,
}

/// Response from `GET /api/movies`.
///
/// Only `movies` is required; the backend also reports a count and a status
/// message which are accepted when present.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviesResponse {
    /// Movies in server order.
    pub movies: Vec<Movie>,
    /// Number of movies reported by the backend.
    #[serde(default)]
    pub count: Option<usize>,
    /// Status message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from `GET /api/movies/<id>`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieResponse {
    /// The requested movie.
    pub movie: Movie,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// Service status (`"healthy"` when up).
    pub status: String,
    /// Human-readable status message.
    pub message: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    /// Error description.
    pub error: String,
}
