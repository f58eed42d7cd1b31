use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::America::New_York;
use tracing::{debug, info};

use crate::config::UpdaterConfig;
use crate::directory::Directory;
use crate::fetch::PageFetcher;
use crate::fixtures::select_windows;
use crate::metrics::CycleOutcome;
use crate::render::Renderer;
use crate::schedule::ScheduleScraper;
use crate::sidebar::SidebarStore;
use crate::splice::splice;
use crate::standings::StandingsScraper;

pub struct SidebarUpdater<'a, F: PageFetcher, S: SidebarStore> {
    fetcher: &'a F,
    store: &'a S,
    config: UpdaterConfig,
}

impl<'a, F: PageFetcher, S: SidebarStore> SidebarUpdater<'a, F, S> {
    pub fn new(fetcher: &'a F, store: &'a S, config: UpdaterConfig) -> Self {
        Self {
            fetcher,
            store,
            config,
        }
    }

    pub fn load_directory(&self) -> Result<Directory> {
        let json = self
            .fetcher
            .fetch_page(&self.config.sources.directory_url)
            .context("Fetching team directory")?;
        Directory::from_wiki_json(&json).context("Parsing team directory")
    }

    /// Scrapes every source and renders the managed sidebar block. The
    /// directory is loaded fresh on every call.
    pub fn build_sidebar(&self, now: DateTime<Utc>) -> Result<String> {
        let directory = self.load_directory()?;
        let team_name = &self.config.sidebar.team_name;

        let schedule =
            ScheduleScraper::new(self.fetcher, &self.config.sources.schedule_url, team_name)
                .fetch_schedule()
                .context("Parsing schedule")?;
        let standings = StandingsScraper::new(
            self.fetcher,
            &self.config.sources.standings_url,
            &self.config.standings,
        )
        .fetch_standings()
        .context("Parsing standings")?;

        let windows = select_windows(&schedule, team_name, now);
        debug!(
            "Selected {} upcoming and {} previous matches out of {}",
            windows.upcoming.len(),
            windows.previous.len(),
            schedule.len()
        );

        let today = now.with_timezone(&New_York).date_naive();
        let renderer = Renderer::new(&directory, team_name, &self.config.sources.standings_url);
        Ok(renderer.render(&windows, &standings, today))
    }

    /// One full update. Nothing is written unless every step succeeded.
    pub fn run_cycle(&self, dry_run: bool, now: DateTime<Utc>) -> Result<CycleOutcome> {
        let block = self.build_sidebar(now)?;

        let description = self.store.read_description().context("Reading sidebar")?;
        let sidebar = &self.config.sidebar;
        let updated = splice(&description, &block, &sidebar.start_marker, &sidebar.end_marker)
            .context("Broken sidebar")?;

        if dry_run {
            info!("{}", updated);
            return Ok(CycleOutcome::DryRun);
        }

        self.store
            .write_description(&updated)
            .context("Updating sidebar")?;
        Ok(CycleOutcome::Published)
    }
}
