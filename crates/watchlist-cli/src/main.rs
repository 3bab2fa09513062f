//! watchlist - browse a movie watchlist backend from the terminal.

/// Application configuration (TOML).
mod config;

use std::fs::{self, OpenOptions};
use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::AppConfig;
use watchlist_api::movies::{MovieClient, MovieFilter, Rating, WatchedFilter};
use watchlist_tui::movie_list::fetch::fetch_current_page;
use watchlist_tui::movie_list::input::ViewOptions;
use watchlist_tui::movie_list::projection::{GridContent, project, rating_stars};
use watchlist_tui::movie_list::state::{MovieListView, RequestStatus};

/// Log file written during `browse`, next to the config file.
const LOG_FILE_NAME: &str = "watchlist.log";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Override the backend base URL (e.g. `http://localhost:5000/api/`).
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse movies interactively via TUI.
    Browse(FilterArgs),
    /// Fetch one page of movies and print it.
    List(FilterArgs),
    /// Show or initialise the config file.
    Config(ConfigCommand),
}

/// Initial filter shared by `browse` and `list`.
#[derive(clap::Args)]
struct FilterArgs {
    /// Only movies of this genre.
    #[arg(long)]
    genre: Option<String>,

    /// Watched status filter.
    #[arg(long, value_enum, default_value_t = WatchedArg::All)]
    watched: WatchedArg,

    /// Only movies with this rating (1-5).
    #[arg(long)]
    rating: Option<Rating>,

    /// Page to show (starting at 1).
    #[arg(long)]
    page: Option<NonZeroU32>,

    /// Movies per page (default: `view.page_size` from config).
    #[arg(long)]
    limit: Option<NonZeroU32>,
}

/// Watched status as accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum WatchedArg {
    /// Watched and unwatched movies.
    All,
    /// Watched movies only.
    Watched,
    /// Unwatched movies only.
    Unwatched,
}

impl From<WatchedArg> for WatchedFilter {
    fn from(arg: WatchedArg) -> Self {
        match arg {
            WatchedArg::All => Self::Any,
            WatchedArg::Watched => Self::Watched,
            WatchedArg::Unwatched => Self::Unwatched,
        }
    }
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective configuration.
    Show,
    /// Write the default configuration file.
    Init(ConfigInitArgs),
    /// Print the config file path.
    Path,
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct ConfigInitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

/// Destination of the fmt log layer.
#[derive(Debug, PartialEq, Eq)]
enum LogTarget {
    /// Standard output, shared with command output.
    Stdout,
    /// Appended to a file while the TUI owns the terminal.
    File(PathBuf),
}

impl LogTarget {
    /// Picks the destination for `command`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be resolved.
    fn for_command(command: &Commands, dir: Option<&Path>) -> Result<Self> {
        match command {
            Commands::Browse(_) => {
                let config_path = config_file(dir)?;
                Ok(Self::File(config_path.with_file_name(LOG_FILE_NAME)))
            }
            Commands::List(_) | Commands::Config(_) => Ok(Self::Stdout),
        }
    }

    /// Opens the destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be created.
    fn make_writer(&self) -> Result<BoxMakeWriter> {
        match self {
            Self::Stdout => Ok(BoxMakeWriter::new(io::stdout)),
            Self::File(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create directory {}", parent.display())
                    })?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("failed to open log file {}", path.display()))?;
                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
        }
    }

    /// Colour only when writing to the terminal.
    const fn ansi(&self) -> bool {
        matches!(self, Self::Stdout)
    }
}

/// Installs the global subscriber writing to `target`.
///
/// # Errors
///
/// Returns an error if the log destination cannot be opened.
fn init_tracing(target: &LogTarget) -> Result<()> {
    let writer = target.make_writer()?;

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(target.ansi())
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(target.ansi())
            .with_writer(writer);

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

/// Config file path selected by `--dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved.
fn config_file(dir: Option<&Path>) -> Result<PathBuf> {
    AppConfig::locate(dir).context("failed to resolve config path")
}

/// Loads the config file selected by `--dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(&config_file(dir)?).context("failed to load config")
}

/// Builds the backend client from config and the `--base-url` override.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_movie_client(config: &AppConfig, base_url: Option<&Url>) -> Result<MovieClient> {
    let base_url = config.server.effective_base_url(base_url)?;
    tracing::debug!(%base_url, "using watchlist backend");

    MovieClient::builder()
        .base_url(base_url)
        .timeout(config.server.timeout())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build API client")
}

/// Builds the initial view from command-line filter arguments and config.
///
/// # Errors
///
/// Returns an error if the configured page size is invalid.
fn build_view(args: &FilterArgs, config: &AppConfig) -> Result<MovieListView> {
    let page_size = match args.limit {
        Some(limit) => limit,
        None => config.view.page_size()?,
    };
    let filter = MovieFilter {
        genre: args
            .genre
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(String::from),
        watched: args.watched.into(),
        rating: args.rating,
        page: args.page.unwrap_or(NonZeroU32::MIN),
        page_size,
    };
    Ok(MovieListView::new(filter).with_page_reset(config.view.reset_page_on_filter_change))
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if config loading, client setup, or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &FilterArgs, dir: Option<&Path>, base_url: Option<&Url>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_movie_client(&config, base_url)?;
    let view = build_view(args, &config)?;
    let options = ViewOptions {
        genres: config.view.genres.clone(),
        page_sizes: config.view.page_sizes(),
    };

    watchlist_tui::run_movie_list(Arc::new(client), view, options)
        .await
        .context("movie list TUI failed")
}

/// Runs the `list` subcommand.
///
/// Mounts the view, runs its single fetch, and prints the cards.
///
/// # Errors
///
/// Returns an error with the displayed message if the fetch fails.
#[instrument(skip_all)]
async fn run_list(args: &FilterArgs, dir: Option<&Path>, base_url: Option<&Url>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_movie_client(&config, base_url)?;
    let mut view = build_view(args, &config)?;

    let ticket = view.mount();
    let outcome = fetch_current_page(&client, ticket).await;
    view.apply_outcome(outcome);

    if let RequestStatus::Failed(message) = view.status() {
        anyhow::bail!("{message}");
    }

    let projection = project(&view);
    tracing::info!(
        "Genre: {}  Watched: {}  Rating: {}  Per page: {}",
        projection.filters.genre,
        projection.filters.watched,
        projection.filters.rating,
        projection.filters.page_size,
    );

    if let GridContent::Cards(cards) = &projection.grid {
        if cards.is_empty() {
            tracing::info!("No movies found");
        }
        for card in cards {
            let (key, movie) = (card.key, card.movie);
            let title = &movie.title;
            let genre = movie.genre.as_deref().unwrap_or("-");
            let year = movie
                .year
                .map_or_else(|| String::from("-"), |y| y.to_string());
            let watched = if movie.watched { "watched" } else { "unwatched" };
            let stars = rating_stars(movie.rating);
            tracing::info!("{key}\t{title}\t{genre}\t{year}\t{watched}\t{stars}");
        }
    }

    tracing::info!(
        "Page {} of {}",
        projection.pagination.current(),
        projection.pagination.total()
    );

    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&Path>, base_url: Option<&Url>) -> Result<()> {
    let mut config = load_config(dir)?;
    if let Some(url) = base_url {
        config.server.base_url = url.to_string();
    }
    for line in config.to_toml()?.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
#[instrument(skip_all)]
fn run_config_init(args: &ConfigInitArgs, dir: Option<&Path>) -> Result<()> {
    let config_path = config_file(dir)?;
    if config_path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    AppConfig::default()
        .save(&config_path)
        .context("failed to save config")?;
    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

/// Runs the `config path` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved.
fn run_config_path(dir: Option<&Path>) -> Result<()> {
    let config_path = config_file(dir)?;
    tracing::info!("{}", config_path.display());
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
    let dir = cli.dir.as_deref();
    let base_url = cli.base_url.as_ref();
    init_tracing(&LogTarget::for_command(&cli.command, dir)?)?;

    match cli.command {
        Commands::Browse(args) => run_browse(&args, dir, base_url).await,
        Commands::List(args) => run_list(&args, dir, base_url).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(dir, base_url),
            ConfigSubcommands::Init(args) => run_config_init(&args, dir),
            ConfigSubcommands::Path => run_config_path(dir),
        },
    }
}
