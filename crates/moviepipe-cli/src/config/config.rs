//! `AppConfig` struct and TOML read/write.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Backend connection configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the movie backend, e.g. `http://localhost:5000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ApiConfig {
    /// Stores `url` as the backend base URL after checking it parses.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not an absolute URL.
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        Url::parse(url).with_context(|| format!("invalid backend URL: {url}"))?;
        self.base_url = Some(String::from(url));
        Ok(())
    }
}

impl AppConfig {
    /// Reads the movie client config at `path`.
    ///
    /// A missing file means nothing has been saved yet and yields the
    /// default (backend URL unset). A stored `api.base_url` must parse as a
    /// URL so a bad value is reported against the file, not the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds an invalid `api.base_url`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no movie client config, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read movie client config {}", path.display()));
            }
        };

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse movie client config {}", path.display()))?;
        if let Some(url) = &config.api.base_url {
            Url::parse(url).with_context(|| {
                format!("api.base_url in {} is not a valid URL: {url}", path.display())
            })?;
        }
        Ok(config)
    }

    /// Writes the movie client config to `path`, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }
        let content =
            toml::to_string_pretty(self).context("failed to encode movie client config")?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write movie client config {}", path.display()))
    }
}
