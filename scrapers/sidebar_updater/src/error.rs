use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Source unavailable: {url}: {reason}")]
    SourceUnavailable { url: String, reason: String },
    #[error("Malformed source: {0}")]
    MalformedSource(String),
    #[error("Marker not found in sidebar: {0:?}")]
    MarkerNotFound(String),
    #[error("Team directory load failed: {0}")]
    DirectoryLoadFailure(String),
    #[error("Sidebar store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, UpdateError>;

impl UpdateError {
    pub fn unavailable(url: &str, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
