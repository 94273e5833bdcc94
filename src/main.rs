//! Profile-Scout main entry point
//!
//! Command-line interface for the listing-to-database profile harvester.

use anyhow::Context;
use clap::Parser;
use profile_scout::config::load_config_with_hash;
use profile_scout::crawler::run_crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Profile-Scout: a listing-to-database profile harvester
///
/// Walks a paginated user listing, extracts each user's profile identifiers
/// and declared homepage link, and upserts the results into MySQL while
/// rotating VPN egress between page fetches.
#[derive(Parser, Debug)]
#[command(name = "profile-scout")]
#[command(version = "1.0.0")]
#[command(about = "A listing-to-database profile harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let collected = run_crawl(config).await.context("crawl failed to start")?;
    println!("Collected {} user records", collected.len());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("profile_scout=info,warn"),
            1 => EnvFilter::new("profile_scout=debug,info"),
            2 => EnvFilter::new("profile_scout=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &profile_scout::config::Config) {
    println!("=== Profile-Scout Dry Run ===\n");

    println!("Crawl:");
    println!("  Base URL: {}", config.crawl.base_url);
    println!(
        "  Pages: {} starting at page {}",
        config.crawl.max_pages, config.crawl.start_page
    );
    println!(
        "  Rate-limit retries per page: {}",
        config.crawl.max_rate_limit_retries
    );

    println!("\nVPN:");
    println!("  Command: {}", config.vpn.command);
    println!("  Rotation attempts per page: {}", config.vpn.retries);
    println!("  Servers ({}):", config.vpn.servers.len());
    for server in &config.vpn.servers {
        println!("    - {}", server);
    }

    println!("\nDatabase:");
    println!("  Host: {}", config.database.host);
    println!("  Database: {}", config.database.database);
    println!("  User: {}", config.database.user);

    println!("\n✓ Configuration is valid");
}
