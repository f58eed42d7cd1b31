use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const START_MARKER: &str = "##Upcoming Events";
pub const END_MARKER: &str = "##NYRB II (USL)";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            user_agent: "RBNYSideBarUpdater (by /u/Watchful1)".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourcesConfig {
    pub directory_url: String,
    pub standings_url: String,
    pub schedule_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            directory_url: "https://www.reddit.com/r/mls/wiki/sidebar-teams.json".to_string(),
            standings_url: "http://www.mlssoccer.com/standings".to_string(),
            schedule_url: "https://www.newyorkredbulls.com/schedule?year=2017".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingsConfig {
    pub east_size: usize,
    pub west_size: usize,
}

impl Default for StandingsConfig {
    fn default() -> Self {
        Self {
            east_size: 11,
            west_size: 11,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidebarConfig {
    pub subreddit: String,
    pub team_name: String,
    pub start_marker: String,
    pub end_marker: String,
    pub interval_secs: u64,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            subreddit: "rbny".to_string(),
            team_name: "New York Red Bulls".to_string(),
            start_marker: START_MARKER.to_string(),
            end_marker: END_MARKER.to_string(),
            interval_secs: 15 * 60,
        }
    }
}

/// Rotating log file next to the console output. An empty `directory` turns it off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_prefix: "bot".to_string(),
            max_files: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdaterConfig {
    pub scraping: ScrapingConfig,
    pub sources: SourcesConfig,
    pub standings: StandingsConfig,
    pub sidebar: SidebarConfig,
    pub logging: LoggingConfig,
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl UpdaterConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Some(timeout) = parsed_var("SCRAPER_TIMEOUT_SECS") {
            config.scraping.request_timeout_secs = timeout;
        }
        if let Ok(url) = env::var("SIDEBAR_DIRECTORY_URL") {
            config.sources.directory_url = url;
        }
        if let Ok(url) = env::var("SIDEBAR_STANDINGS_URL") {
            config.sources.standings_url = url;
        }
        if let Ok(url) = env::var("SIDEBAR_SCHEDULE_URL") {
            config.sources.schedule_url = url;
        }
        if let Some(size) = parsed_var("SIDEBAR_EAST_SIZE") {
            config.standings.east_size = size;
        }
        if let Some(size) = parsed_var("SIDEBAR_WEST_SIZE") {
            config.standings.west_size = size;
        }
        if let Ok(subreddit) = env::var("SIDEBAR_SUBREDDIT") {
            config.sidebar.subreddit = subreddit;
        }
        if let Ok(team_name) = env::var("SIDEBAR_TEAM_NAME") {
            config.sidebar.team_name = team_name;
        }
        if let Some(interval) = parsed_var("SIDEBAR_INTERVAL_SECS") {
            config.sidebar.interval_secs = interval;
        }
        if let Ok(directory) = env::var("SIDEBAR_LOG_DIR") {
            config.logging.directory = directory;
        }
        if let Some(max_files) = parsed_var("SIDEBAR_LOG_MAX_FILES") {
            config.logging.max_files = max_files;
        }

        config
    }
}

/// Script-app credentials for one bot account, selected by user name.
#[derive(Clone, PartialEq, Eq)]
pub struct RedditCredentials {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("username", &self.username)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl RedditCredentials {
    pub fn from_env(user: &str) -> Result<Self> {
        let prefix = format!("REDDIT_{}", env_key(user));
        let var = |suffix: &str| -> Result<String> {
            let name = format!("{}_{}", prefix, suffix);
            env::var(&name)
                .with_context(|| format!("User {} not configured: {} is not set", user, name))
        };

        Ok(Self {
            username: user.to_string(),
            client_id: var("CLIENT_ID")?,
            client_secret: var("CLIENT_SECRET")?,
            password: var("PASSWORD")?,
        })
    }
}

fn env_key(user: &str) -> String {
    user.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}
