//! `MovieClient` - Movie Picture Pipeline backend client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::MoviesApi;
use super::types::{ApiErrorResponse, HealthStatus, Movie, MovieResponse, MoviesResponse};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Movie Picture Pipeline backend client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
}

/// Builder for `MovieClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
}

impl MovieClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (default: `http://localhost:5000`).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// No request timeout is configured: a backend that never answers keeps
    /// the request pending.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<MovieClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(MovieClient {
            http_client,
            base_url,
        })
    }
}

impl MovieClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> MovieClientBuilder {
        MovieClientBuilder::new()
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` below the base URL, keeping any path prefix the base carries.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path)
            .with_context(|| format!("failed to join URL path: {path}"))
    }

    /// Sends a GET request and decodes the JSON body.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "backend request");

        let result = self.http_client.get(url).send().await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&body) {
                bail!(
                    "backend error (HTTP {status}): {}",
                    error_response.error
                );
            }
            bail!("backend error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl MoviesApi for MovieClient {
    #[instrument(skip_all)]
    async fn list_movies(&self) -> Result<Vec<Movie>> {
        let response: MoviesResponse = self.get_json("api/movies").await?;
        if let Some(count) = response.count
            && count != response.movies.len()
        {
            tracing::debug!(
                reported = count,
                received = response.movies.len(),
                "movie count mismatch"
            );
        }
        Ok(response.movies)
    }

    #[instrument(skip_all, fields(id = id))]
    async fn movie(&self, id: i64) -> Result<Movie> {
        let path = format!("api/movies/{id}");
        let response: MovieResponse = self.get_json(&path).await?;
        Ok(response.movie)
    }

    #[instrument(skip_all)]
    async fn health(&self) -> Result<HealthStatus> {
        self.get_json("health").await
    }
}
