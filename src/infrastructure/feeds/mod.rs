pub mod google_trends;
pub mod reddit;
pub mod tiktok;

use crate::domain::entities::signal::SignalRecord;
use crate::domain::error::DomainError;
use async_trait::async_trait;
use thiserror::Error;

/// A data feed that produces signal records from an external platform.
#[async_trait]
pub trait Feed: Send + Sync {
    /// Human-readable name of this feed.
    fn name(&self) -> &str;

    /// Fetch data and return validated signals ready to be stored.
    async fn fetch(&self) -> Result<FetchOutput, FeedError>;
}

/// Output of a feed fetch: signals plus non-fatal per-source errors.
#[derive(Debug, Default)]
pub struct FetchOutput {
    pub signals: Vec<SignalRecord>,
    pub fetch_errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP or network error
    #[error("Network error: {0}")]
    Network(String),
    /// Response parsing error
    #[error("Parse error: {0}")]
    Parse(String),
    /// Configuration error (missing endpoint, etc.)
    #[error("Config error: {0}")]
    Config(String),
}

impl From<FeedError> for DomainError {
    fn from(e: FeedError) -> Self {
        DomainError::Feed(e.to_string())
    }
}

/// Result of running a feed through ingestion.
#[derive(Debug, Default, serde::Serialize)]
pub struct FeedResult {
    pub feed_name: String,
    pub signals_fetched: usize,
    pub trends_created: usize,
    pub metrics_inserted: usize,
    pub metrics_updated: usize,
    pub metrics_unchanged: usize,
    pub errors: Vec<String>,
}

/// Shared browser-like user agent for public trend endpoints.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
