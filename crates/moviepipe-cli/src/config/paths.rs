//! Config directory resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory name under the user config root.
const APP_DIR: &str = "moviepipe";

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Browser log file name, kept next to the config file.
const LOG_FILE: &str = "moviepipe.log";

/// Locates the movie client config file.
///
/// `--dir` wins. Otherwise `$XDG_CONFIG_HOME/moviepipe/config.toml` when
/// that variable holds an absolute path, then `~/.config/moviepipe/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `dir`, an absolute `XDG_CONFIG_HOME` nor
/// `HOME` is available.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    config_path_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Picks the config file from the given environment values.
fn config_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    let root = match xdg_config_home.map(PathBuf::from) {
        Some(xdg) if xdg.is_absolute() => xdg,
        _ => home
            .filter(|h| !h.is_empty())
            .map(|h| PathBuf::from(h).join(".config"))
            .context("cannot locate the moviepipe config directory: HOME is not set")?,
    };
    Ok(root.join(APP_DIR).join(CONFIG_FILE))
}

/// Resolves the log file used while the browser owns the terminal.
///
/// `explicit` wins; otherwise `moviepipe.log` next to `config_path`.
#[must_use]
pub fn resolve_log_path(explicit: Option<&PathBuf>, config_path: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.clone();
    }
    config_path
        .parent()
        .map_or_else(|| PathBuf::from(LOG_FILE), |d| d.join(LOG_FILE))
}
