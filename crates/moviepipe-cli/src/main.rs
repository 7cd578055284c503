//! moviepipe - Movie Picture Pipeline terminal client.

/// Application configuration (TOML).
mod config;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path, resolve_log_path};
use moviepipe_api::{DEFAULT_BASE_URL, LocalMoviesApi, MovieClient};
use moviepipe_tui::fetcher::FetchState;
use moviepipe_tui::view::{MovieCard, page};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Backend base URL (default: config `[api] base_url`, then http://localhost:5000).
    #[arg(long, global = true, env = "MOVIE_API_URL")]
    api_url: Option<String>,

    /// Write logs to this file instead of stdout (browse default: next to config.toml).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Subcommand to run (default: browse).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse the movie collection interactively.
    Browse,
    /// Fetch the movie collection once and print it.
    List,
    /// Fetch and print a single movie.
    Show(ShowArgs),
    /// Query the backend health endpoint.
    Health,
    /// Show or update the config file.
    Config(ConfigArgs),
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
struct ShowArgs {
    /// Movie ID.
    #[arg(long, allow_negative_numbers = true)]
    id: i64,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigArgs {
    /// Persist this backend base URL as `[api] base_url`.
    #[arg(long)]
    set_api_url: Option<String>,
}

/// Picks the backend base URL: flag or `MOVIE_API_URL`, then config, then default.
fn resolve_api_url(cli_url: Option<&str>, config: &AppConfig) -> String {
    cli_url
        .or(config.api.base_url.as_deref())
        .map_or_else(|| String::from(DEFAULT_BASE_URL), String::from)
}

/// Builds a `MovieClient` for `api_url`.
///
/// # Errors
///
/// Returns an error if `api_url` is not a valid URL or the client fails to build.
fn build_client(api_url: &str) -> Result<MovieClient> {
    let base_url = Url::parse(api_url).with_context(|| format!("invalid backend URL: {api_url}"))?;

    MovieClient::builder()
        .base_url(base_url)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build movie client")
}

/// Runs the `browse` subcommand (the default).
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;
    tracing::info!(api_url, "launching movie browser");

    moviepipe_tui::run_browser(client, String::from(api_url))
        .await
        .context("movie browser TUI failed")
}

/// Runs the `list` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_list(api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;

    let movies = client
        .list_movies()
        .await
        .context("failed to fetch movies")?;

    let state = FetchState::Success { movies };
    for line in page(&state, api_url).plain_text().lines() {
        tracing::info!("{line}");
    }

    Ok(())
}

/// Runs the `show` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all, fields(id = args.id))]
async fn run_show(args: &ShowArgs, api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;

    let movie = client
        .movie(args.id)
        .await
        .with_context(|| format!("failed to fetch movie {}", args.id))?;

    for line in MovieCard::new(&movie).lines() {
        tracing::info!("{line}");
    }

    Ok(())
}

/// Runs the `health` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_health(api_url: &str) -> Result<()> {
    let client = build_client(api_url)?;

    let health = client
        .health()
        .await
        .context("backend health check failed")?;

    tracing::info!("{api_url}: {} ({})", health.status, health.message);

    Ok(())
}

/// Runs the `config` subcommand.
///
/// # Errors
///
/// Returns an error if the new URL is invalid or the config cannot be saved.
#[instrument(skip_all)]
fn run_config(
    args: &ConfigArgs,
    config_path: &Path,
    mut config: AppConfig,
    api_url: &str,
) -> Result<()> {
    if let Some(new_url) = &args.set_api_url {
        config.api.set_base_url(new_url)?;
        config.save(config_path).context("failed to save config")?;
        tracing::info!("Saved api.base_url = {new_url} to {}", config_path.display());
        return Ok(());
    }

    tracing::info!("Config file: {}", config_path.display());
    tracing::info!(
        "api.base_url: {}",
        config.api.base_url.as_deref().unwrap_or("(not set)")
    );
    tracing::info!("Effective backend URL: {api_url}");

    Ok(())
}

/// Installs the global tracing subscriber.
///
/// Logs go to `log_file` when given (without ANSI colors), otherwise stdout.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, ansi) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stdout), true),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    #[cfg(not(feature = "otel"))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Browse);

    let config_path =
        resolve_config_path(cli.dir.as_ref()).context("failed to resolve config path")?;
    let log_file = match command {
        Commands::Browse => Some(resolve_log_path(cli.log_file.as_ref(), &config_path)),
        _ => cli.log_file.clone(),
    };
    init_tracing(log_file.as_deref())?;

    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let api_url = resolve_api_url(cli.api_url.as_deref(), &config);

    match command {
        Commands::Browse => run_browse(&api_url).await,
        Commands::List => run_list(&api_url).await,
        Commands::Show(args) => run_show(&args, &api_url).await,
        Commands::Health => run_health(&api_url).await,
        Commands::Config(args) => run_config(&args, &config_path, config, &api_url),
    }
}
