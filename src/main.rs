//! Webmirror main entry point
//!
//! Command-line interface for mirroring a site to local storage.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use webmirror::config::CrawlConfig;
use webmirror::crawler::run_crawl;

/// Webmirror: a polite site mirroring crawler
///
/// Recursively downloads a site into a local directory, staying on the seed's
/// host, honoring robots.txt rules and crawl delays, and bounding both
/// recursion depth and concurrent fetches.
#[derive(Parser, Debug)]
#[command(name = "webmirror")]
#[command(version = "1.0.0")]
#[command(about = "Mirror a website to local storage", long_about = None)]
struct Cli {
    /// The URL to start mirroring from
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum recursion depth from the seed (0 = seed page only)
    #[arg(short, long, default_value_t = 2)]
    depth: u32,

    /// Maximum number of concurrent fetches
    #[arg(short, long, default_value_t = 5)]
    concurrent: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Output directory for the mirror
    #[arg(short, long, default_value = "mirrored_site")]
    output: PathBuf,

    /// User-Agent header value
    #[arg(short, long, default_value = "webmirror/1.0")]
    user_agent: String,

    /// Ignore robots.txt rules and crawl delays
    #[arg(long)]
    no_robots: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = CrawlConfig {
        max_depth: cli.depth,
        max_concurrent: cli.concurrent,
        timeout: Duration::from_secs(cli.timeout),
        user_agent: cli.user_agent,
        output_dir: cli.output,
        respect_robots: !cli.no_robots,
    };

    if let Err(e) = run_crawl(config, &cli.url).await {
        tracing::error!("Crawl failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webmirror=info,warn"),
            1 => EnvFilter::new("webmirror=debug,info"),
            2 => EnvFilter::new("webmirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
