//! Reachscan main entry point
//!
//! This is the command-line interface for the incremental reachability scanner.

use anyhow::Context;
use clap::Parser;
use reachscan::config::{load_or_default, Config};
use reachscan::domain::load_domain_set;
use reachscan::output::{load_statistics, print_statistics, print_summary, write_change_signal};
use reachscan::scanner::{plan, run_scan};
use reachscan::storage::{JsonStateStore, StateStore};
use reachscan::ScanMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Reachscan: incremental DNS reachability scanner
///
/// Reads a hosts-format blocklist, probes domains that have not been checked
/// before (or every domain in full mode), and keeps a list of the domains
/// that resolved.
#[derive(Parser, Debug)]
#[command(name = "reachscan")]
#[command(version)]
#[command(about = "Incremental DNS reachability scanner for blocklists", long_about = None)]
struct Cli {
    /// Scan mode
    #[arg(short, long, value_enum, default_value_t = ScanMode::Incremental)]
    mode: ScanMode,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Source blocklist (overrides paths.source-list)
    #[arg(long, value_name = "PATH")]
    source: Option<PathBuf>,

    /// Reachable artifact (overrides paths.reachable-list)
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// State file (overrides paths.state-file)
    #[arg(long, value_name = "PATH")]
    state: Option<PathBuf>,

    /// Append `changed=<bool>` to this file after the run
    #[arg(long, value_name = "PATH", env = "GITHUB_OUTPUT")]
    signal_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show what would be probed without probing or writing anything
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the state file and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_config(&cli).map_err(|e| {
        tracing::error!("Failed to load configuration: {:#}", e);
        e
    })?;

    if cli.dry_run {
        handle_dry_run(&config, cli.mode)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_scan(&config, cli.mode, cli.signal_file.as_deref()).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries the summary and the change signal.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("reachscan=info,warn"),
            1 => EnvFilter::new("reachscan=debug,info"),
            2 => EnvFilter::new("reachscan=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (or defaults) and applies CLI path overrides
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = load_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("loading configuration from {}", path.display()),
        None => "validating default configuration".to_string(),
    })?;

    if let Some(source) = &cli.source {
        config.paths.source_list = source.clone();
    }
    if let Some(output) = &cli.output {
        config.paths.reachable_list = output.clone();
    }
    if let Some(state) = &cli.state {
        config.paths.state_file = state.clone();
    }

    reachscan::config::validate(&config).context("validating path overrides")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the plan without probing
fn handle_dry_run(config: &Config, mode: ScanMode) -> anyhow::Result<()> {
    let domains = load_domain_set(&config.paths.source_list)?;
    let state = JsonStateStore::new(&config.paths.state_file).load()?;
    let work = plan(&domains, &state, mode);

    println!("=== Reachscan Dry Run ({}) ===\n", mode);

    println!("Files:");
    println!("  Source: {}", config.paths.source_list.display());
    println!("  Reachable list: {}", config.paths.reachable_list.display());
    println!("  State: {}", config.paths.state_file.display());

    println!("\nProbe:");
    println!("  Timeout: {}ms", config.probe.timeout_ms);
    println!("  Retries: {}", config.probe.retries);
    println!("  Concurrency: {}", config.probe.concurrency);

    println!("\nPlan:");
    println!("  Domains in source: {}", domains.len());
    println!(
        "  Already checked: {}",
        domains.len() - state.count_unchecked(&domains)
    );
    println!("  Would probe: {}", work.len());

    for domain in work.iter().take(10) {
        println!("    * {}", domain);
    }
    if work.len() > 10 {
        println!("    ... and {} more", work.len() - 10);
    }

    Ok(())
}

/// Handles the --stats mode: shows statistics from the state file
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("State: {}\n", config.paths.state_file.display());

    let store = JsonStateStore::new(&config.paths.state_file);
    let stats = load_statistics(&store, &config.paths.reachable_list)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main scan operation
async fn handle_scan(
    config: &Config,
    mode: ScanMode,
    signal_file: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    tracing::info!(
        "Scanning {} in {} mode",
        config.paths.source_list.display(),
        mode
    );

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, saving completed work");
        } else {
            // No signal handler available; never trigger shutdown
            std::future::pending::<()>().await;
        }
    };

    let summary = match run_scan(config, mode, shutdown).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Scan failed: {}", e);
            return Err(e.into());
        }
    };

    print_summary(&summary);

    if let Some(path) = signal_file {
        write_change_signal(path, summary.artifact_changed)?;
    }

    Ok(())
}
