//! Wiki-Harvest main entry point
//!
//! This is the command-line interface for the Wiki-Harvest article harvester.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wiki_harvest::config::{load_config_with_hash, Config};
use wiki_harvest::output::{print_statistics, RunStatistics};
use wiki_harvest::storage::{flush_all, open_sinks};
use wiki_harvest::strategy::Strategies;
use wiki_harvest::{HttpSession, PageLoader, RecordStore};

/// Records gathered by the featured harvest in the default mode
const DEFAULT_FEATURED_TARGET: usize = 10;

/// Total records the default mode tops up to with random samples
const DEFAULT_TOTAL_TARGET: usize = 20;

/// Wiki-Harvest: an article harvester for encyclopedia-style sites
///
/// Wiki-Harvest collects article records by crawling, searching, sampling
/// random pages or reading the main page's curated zones, then writes them
/// to a timestamped CSV file and, optionally, a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "wiki-harvest")]
#[command(version)]
#[command(about = "An article harvester for encyclopedia-style sites", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Search for a term, then crawl outward from the result
    #[arg(long, value_name = "TERM")]
    search: Option<String>,

    /// Harvest the main page's featured zones
    #[arg(long)]
    featured: bool,

    /// Crawl related articles starting from --url
    #[arg(long)]
    crawl: bool,

    /// Collect random articles
    #[arg(long)]
    random: bool,

    /// Page to start crawling from [default: the site's main page]
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Crawl depth [default: 2]
    #[arg(long)]
    depth: Option<u32>,

    /// Maximum number of articles to collect [default: 25]
    #[arg(long = "max-articles", alias = "max_articles", value_parser = clap::value_parser!(u64).range(1..))]
    max_articles: Option<u64>,

    /// Accepted for compatibility; pages are always fetched without a browser window
    #[arg(long)]
    headless: bool,

    /// Also store the records in the SQLite database
    #[arg(long)]
    db: bool,

    /// Write logs to this file in addition to the terminal
    #[arg(long, value_name = "PATH", conflicts_with = "no_log_file")]
    log_file: Option<PathBuf>,

    /// Do not write a log file
    #[arg(long)]
    no_log_file: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// The acquisition strategy selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Search(String),
    Featured,
    Random,
    Crawl,
    Default,
}

impl Cli {
    /// Resolves the strategy flags, first match wins
    fn mode(&self) -> Mode {
        if let Some(term) = &self.search {
            Mode::Search(term.clone())
        } else if self.featured {
            Mode::Featured
        } else if self.random {
            Mode::Random
        } else if self.crawl {
            Mode::Crawl
        } else {
            Mode::Default
        }
    }

    fn log_path(&self, config: &Config) -> Option<PathBuf> {
        if self.no_log_file {
            return None;
        }
        self.log_file.clone().or_else(|| {
            let configured = config.output.log_file.trim();
            (!configured.is_empty()).then(|| PathBuf::from(configured))
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    setup_logging(cli.verbose, cli.quiet, cli.log_path(&config).as_deref());

    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        ),
        _ => tracing::info!("Using built-in configuration"),
    }

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(max_articles) = cli.max_articles {
        config.crawler.max_articles = max_articles as usize;
    }
    if cli.headless {
        tracing::debug!("--headless has no effect; pages are fetched over HTTP");
    }

    let strategies = Strategies::from_config(&config)?;
    let mut session = HttpSession::new(&config)?;
    let mut store = RecordStore::new();
    let mut stats = RunStatistics::default();
    let started = Instant::now();

    let mode = cli.mode();
    tracing::info!("Starting harvest ({:?})", mode);
    run_mode(
        &mode,
        &cli,
        &config,
        &strategies,
        &mut session,
        &mut store,
        &mut stats,
    )
    .await;

    let mut sinks = open_sinks(&config.output, cli.db);
    let reports = flush_all(&mut sinks, store.records());

    let coverage = RunStatistics::from_store(&store);
    stats.total_records = coverage.total_records;
    stats.with_summary = coverage.with_summary;
    stats.with_image = coverage.with_image;
    stats.with_categories = coverage.with_categories;
    stats.sinks = reports;
    stats.elapsed = started.elapsed();

    if !cli.quiet {
        print_statistics(&stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// When `log_file` is given, every event is also written there without ANSI
/// colours. A log file that cannot be created is reported and skipped.
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_harvest=info,warn"),
            1 => EnvFilter::new("wiki_harvest=debug,info"),
            2 => EnvFilter::new("wiki_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    let file_layer = log_file.and_then(|path| match open_log_file(path) {
        Ok(appender) => Some(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true),
        ),
        Err(e) => {
            eprintln!("Cannot write log file {}: {}", path.display(), e);
            None
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}

fn open_log_file(path: &Path) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("{} has no file name", path.display()))?;

    Ok(RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)?)
}

/// Runs the selected strategy, logging failures instead of aborting the run
async fn run_mode(
    mode: &Mode,
    cli: &Cli,
    config: &Config,
    strategies: &Strategies,
    session: &mut HttpSession,
    store: &mut RecordStore,
    stats: &mut RunStatistics,
) {
    let max_articles = config.crawler.max_articles;

    match mode {
        Mode::Search(term) => {
            let before = store.len();
            if let Err(e) = strategies.search.run(session, store, term).await {
                tracing::error!("Search for '{}' failed: {}", term, e);
            }
            stats.record_strategy("search", store.len() - before);
        }
        Mode::Featured => {
            let before = store.len();
            if let Err(e) = strategies.featured.run(session, store, max_articles).await {
                tracing::error!("Error extracting featured articles: {}", e);
            }
            stats.record_strategy("featured", store.len() - before);
        }
        Mode::Random => {
            let before = store.len();
            if let Err(e) = strategies.random.run(session, store, max_articles).await {
                tracing::error!("Error collecting random articles: {}", e);
            }
            stats.record_strategy("random", store.len() - before);
        }
        Mode::Crawl => {
            let before = store.len();
            let start = match &cli.url {
                Some(url) => url.clone(),
                None => match config.site.url_for(&config.site.main_page) {
                    Ok(url) => url.to_string(),
                    Err(e) => {
                        tracing::error!("Invalid main page address: {}", e);
                        return;
                    }
                },
            };

            if !strategies.crawl.accepts_start(&start) {
                tracing::warn!("{} does not look like an article page", start);
            }

            match session.load(&start).await {
                Ok(()) => {
                    if let Err(e) = strategies.crawl.crawl(session, store).await {
                        tracing::error!("Crawl from {} failed: {}", start, e);
                    }
                }
                Err(e) => tracing::error!("Could not open start page: {}", e),
            }
            stats.record_strategy("crawl", store.len() - before);
        }
        Mode::Default => {
            let before = store.len();
            if let Err(e) = strategies
                .featured
                .run(session, store, DEFAULT_FEATURED_TARGET)
                .await
            {
                tracing::error!("Error extracting featured articles: {}", e);
            }
            stats.record_strategy("featured", store.len() - before);

            if store.len() < DEFAULT_TOTAL_TARGET {
                let before = store.len();
                let needed = DEFAULT_TOTAL_TARGET - store.len();
                if let Err(e) = strategies.random.run(session, store, needed).await {
                    tracing::error!("Error collecting random articles: {}", e);
                }
                stats.record_strategy("random", store.len() - before);
            }
        }
    }
}
