//! CLI for boxupdater.
//!
//! Lists tracked GitHub repositories, adds and removes them, and prints the
//! release assets matching each repository's filter.

use boxupdater::{
    default_config_path, latest_only, sort_releases, AppConfig, CheckSummary, ConfigError,
    NewRepository, RegistryError, Release, ReleaseSort, ResolveError, Session, SessionError,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// boxupdater - Track GitHub repositories and list their release assets.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tracked repositories.
    List,

    /// Track a repository.
    Add {
        /// Repository in "owner/name" form.
        repository: String,

        /// Regular expression selecting relevant release assets.
        #[arg(long, default_value = r"\.uf2$")]
        filter: String,

        /// Free-text description.
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Stop tracking a repository.
    Remove {
        /// Display name as shown by `list`.
        display_name: String,
    },

    /// List the release assets of a repository.
    Releases {
        /// Display name as shown by `list`.
        display_name: String,

        /// Only show assets of the latest release.
        #[arg(long)]
        latest: bool,

        /// Ordering of the listed assets.
        #[arg(long, value_enum, default_value_t = SortArg::Feed)]
        sort: SortArg,
    },

    /// Resolve every tracked repository and report asset counts.
    Check,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    /// Order returned by GitHub (newest release first).
    Feed,
    /// Most recently uploaded asset first.
    Newest,
    /// Most downloaded asset first.
    Downloads,
}

impl From<SortArg> for ReleaseSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Feed => ReleaseSort::Feed,
            SortArg::Newest => ReleaseSort::Newest,
            SortArg::Downloads => ReleaseSort::MostDownloaded,
        }
    }
}

/// Errors that end a CLI invocation.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Session setup errors.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Registry changes that could not be applied.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Release resolution errors.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A repository argument not in `owner/name` form.
    #[error("Expected \"owner/name\", got \"{0}\"")]
    InvalidFullName(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    match run(args).await {
        Ok(Some(summary)) if summary.has_failures() => ExitCode::from(1),
        Ok(_) => ExitCode::from(0),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic. Returns the check summary for `check`.
async fn run(args: Args) -> Result<Option<CheckSummary>, CliError> {
    let mut config = load_config(args.config)?;
    if args.token.is_some() {
        config.github_token = args.token;
    }

    let mut session = Session::open(config)?;

    match args.command {
        Command::List => print_repositories(&session),
        Command::Add {
            repository,
            filter,
            description,
        } => {
            let new = parse_repository(&repository, filter, description)?;
            let added = session.registry_mut().add(new)?;
            println!("Added {} as \"{}\"", added.full_name(), added.display_name);
        }
        Command::Remove { display_name } => {
            match session.registry_mut().remove(&display_name)? {
                Some(removed) => println!("Removed {}", removed.full_name()),
                None => println!("No repository named \"{display_name}\""),
            }
        }
        Command::Releases {
            display_name,
            latest,
            sort,
        } => {
            let mut releases = session.fetch_releases(&display_name).await?;
            if latest {
                releases = latest_only(releases);
            }
            sort_releases(&mut releases, sort.into());
            print_releases(&display_name, &releases);
        }
        Command::Check => {
            let summary = session.check_all().await;
            print_summary(&summary);
            return Ok(Some(summary));
        }
    }

    Ok(None)
}

/// Builds the `add` input from an `owner/name` argument.
fn parse_repository(
    full_name: &str,
    filter: String,
    description: String,
) -> Result<NewRepository, CliError> {
    let repository = NewRepository::from_full_name(full_name)
        .ok_or_else(|| CliError::InvalidFullName(full_name.to_string()))?;
    Ok(repository
        .with_asset_filter(filter)
        .with_description(description))
}

/// Loads the config from `path`, or from the default location if present.
fn load_config(path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => AppConfig::load(&path),
        None => match default_config_path() {
            Some(path) => AppConfig::load_or_default(&path),
            None => Ok(AppConfig::default()),
        },
    }
}

fn print_repositories(session: &Session) {
    let repositories = session.registry().repositories();
    println!("\nTracked repositories ({}):", repositories.len());

    for repo in repositories {
        println!("  {}", repo.display_name);
        println!("    Source: {}", repo.full_name());
        if !repo.description.is_empty() {
            println!("    Description: {}", repo.description);
        }
        println!("    Filter: {}", repo.asset_filter);
    }
}

fn print_releases(display_name: &str, releases: &[Release]) {
    println!("\n{display_name}: {} assets", releases.len());

    for release in releases {
        println!(
            "  [{}] {} ({} downloads, uploaded {})",
            release.tag_name, release.name, release.download_count, release.uploaded_at
        );
        println!("    {}", release.download_url);
    }
}

/// Prints the final check summary.
fn print_summary(summary: &CheckSummary) {
    println!("\nSummary:");
    for result in &summary.results {
        match &result.outcome {
            Ok(releases) => println!("  {}: {} assets", result.display_name, releases.len()),
            Err(e) => println!("  {}: failed ({e})", result.display_name),
        }
    }
    println!("  Repositories resolved: {}", summary.succeeded());
    println!("  Repositories failed: {}", summary.failed());
    println!("  Assets found: {}", summary.assets());
}
