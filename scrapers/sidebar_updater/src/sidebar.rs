use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{RedditCredentials, ScrapingConfig};
use crate::error::{Result, UpdateError};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
const SIDEBAR_PAGE: &str = "config/sidebar";

/// Where the sidebar text lives.
pub trait SidebarStore {
    fn read_description(&self) -> Result<String>;
    fn write_description(&self, description: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    data: WikiPageData,
}

#[derive(Debug, Deserialize)]
struct WikiPageData {
    content_md: String,
}

/// The old-reddit sidebar, stored as the `config/sidebar` wiki page of a subreddit.
pub struct RedditSidebar {
    client: reqwest::blocking::Client,
    credentials: RedditCredentials,
    subreddit: String,
    token_url: String,
    api_base: String,
}

impl RedditSidebar {
    pub fn new(
        config: &ScrapingConfig,
        credentials: RedditCredentials,
        subreddit: &str,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| UpdateError::Store(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            subreddit: subreddit.to_string(),
            token_url: TOKEN_URL.to_string(),
            api_base: API_BASE.to_string(),
        })
    }

    /// Points the client at other hosts, for tests against a local server.
    pub fn with_endpoints(mut self, token_url: &str, api_base: &str) -> Self {
        self.token_url = token_url.to_string();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn access_token(&self) -> Result<String> {
        let response: TokenResponse = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| {
                UpdateError::Store(format!(
                    "Authentication failed for {}: {}",
                    self.credentials.username, e
                ))
            })?;
        debug!("Authenticated as {}", self.credentials.username);
        Ok(response.access_token)
    }
}

impl SidebarStore for RedditSidebar {
    fn read_description(&self) -> Result<String> {
        let token = self.access_token()?;
        let url = format!("{}/r/{}/wiki/{}", self.api_base, self.subreddit, SIDEBAR_PAGE);
        let page: WikiPage = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("raw_json", "1")])
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| {
                UpdateError::Store(format!("Failed to read sidebar of r/{}: {}", self.subreddit, e))
            })?;
        Ok(page.data.content_md)
    }

    fn write_description(&self, description: &str) -> Result<()> {
        let token = self.access_token()?;
        let url = format!("{}/r/{}/api/wiki/edit", self.api_base, self.subreddit);
        self.client
            .post(&url)
            .bearer_auth(token)
            .form(&[
                ("page", SIDEBAR_PAGE),
                ("content", description),
                ("reason", "Automated sidebar update"),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                UpdateError::Store(format!(
                    "Failed to update sidebar of r/{}: {}",
                    self.subreddit, e
                ))
            })?;
        info!("Updated sidebar of r/{}", self.subreddit);
        Ok(())
    }
}
