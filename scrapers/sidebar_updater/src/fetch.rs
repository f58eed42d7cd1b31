use std::time::Duration;

use tracing::debug;

use crate::config::ScrapingConfig;
use crate::error::{Result, UpdateError};

pub trait PageFetcher {
    fn fetch_page(&self, url: &str) -> Result<String>;
}

pub struct WebPageFetcher {
    client: reqwest::blocking::Client,
}

impl WebPageFetcher {
    pub fn new(config: &ScrapingConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| UpdateError::unavailable("<client>", e))?;
        Ok(Self { client })
    }
}

impl PageFetcher for WebPageFetcher {
    fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| UpdateError::unavailable(url, e))?;
        response.text().map_err(|e| UpdateError::unavailable(url, e))
    }
}
