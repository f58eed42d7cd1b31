use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use dotenv::dotenv;
use std::{thread, time::Duration};
use tracing::{debug, error, info, warn};

use sidebar_updater::{
    config::{RedditCredentials, UpdaterConfig},
    fetch::WebPageFetcher,
    logging::init_tracing,
    metrics::{CycleOutcome, MetricsCollector},
    pipeline::SidebarUpdater,
    sidebar::RedditSidebar,
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Keeps the subreddit sidebar schedule and standings current",
    long_about = None
)]
struct Cli {
    /// Bot account to post as; credentials come from REDDIT_<USER>_* variables
    user: Option<String>,

    /// Run a single update and exit
    #[arg(long)]
    once: bool,

    /// Log the new sidebar instead of saving it
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    dotenv().ok();
    let config = UpdaterConfig::from_env();
    let _log_guard = init_tracing(&config.logging).context("Setting up logging")?;

    let cli = Cli::parse();
    let Some(user) = cli.user else {
        error!("No user specified, aborting");
        anyhow::bail!("No user specified");
    };

    let credentials = match RedditCredentials::from_env(&user) {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{:#}, aborting", e);
            return Err(e);
        }
    };

    let fetcher = WebPageFetcher::new(&config.scraping).context("Creating page fetcher")?;
    let store = RedditSidebar::new(&config.scraping, credentials, &config.sidebar.subreddit)
        .context("Connecting to reddit")?;
    let interval = Duration::from_secs(config.sidebar.interval_secs);
    info!("Updating r/{} as {}", config.sidebar.subreddit, user);
    let updater = SidebarUpdater::new(&fetcher, &store, config);
    let metrics = MetricsCollector::new();

    loop {
        debug!("Starting run");
        let tracker = metrics.record_cycle_start();

        let outcome = match updater.run_cycle(cli.debug, Utc::now()) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Skipping sidebar update: {:?}", e);
                CycleOutcome::Failed(format!("{:#}", e))
            }
        };
        tracker.finish(&outcome);

        let stats = metrics.get_metrics();
        debug!(
            "Run complete after: {}ms ({:?}, {} published, {} skipped)",
            stats.last_cycle_time_ms, outcome, stats.published_cycles, stats.skipped_cycles
        );

        if cli.once {
            break;
        }
        thread::sleep(interval);
    }

    Ok(())
}
