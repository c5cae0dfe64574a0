use crate::domain::entities::signal::SignalRecord;
use crate::domain::entities::trend::MetricWrite;
use crate::domain::error::DomainError;
use crate::domain::ports::signal_repository::SignalRepository;
use crate::infrastructure::feeds::{Feed, FeedResult};
use chrono::Duration;
use std::sync::Arc;
use tracing::{info, warn};

/// Ingestion: runs feeds and stores what they return.
pub struct CollectUseCase {
    repo: Arc<dyn SignalRepository>,
    scan_window: Duration,
}

impl CollectUseCase {
    pub fn new(repo: Arc<dyn SignalRepository>, scan_window: Duration) -> Self {
        Self { repo, scan_window }
    }

    /// Store one validated signal: upsert its trend, then write the metric for
    /// the current scan window. Returns whether the trend is new and what
    /// happened to the metric.
    pub fn record(&self, signal: &SignalRecord) -> Result<(bool, MetricWrite), DomainError> {
        let (trend, created) = self
            .repo
            .upsert_trend(&signal.topic, signal.niche, signal.observed_at)?;
        let write = self.repo.record_metric(&trend, signal, self.scan_window)?;
        if created {
            info!(
                topic = %signal.topic,
                niche = %signal.niche,
                platform = %signal.platform,
                volume = signal.volume,
                velocity = signal.velocity_score,
                "New trend detected"
            );
        }
        Ok((created, write))
    }

    /// Run every feed in turn. A feed that fails is reported in its
    /// [`FeedResult`] and does not stop the others.
    pub async fn run(&self, feeds: &[Box<dyn Feed>]) -> Vec<FeedResult> {
        let mut results = Vec::with_capacity(feeds.len());
        for feed in feeds {
            results.push(self.run_feed(feed.as_ref()).await);
        }
        results
    }

    #[tracing::instrument(skip_all, fields(feed = feed.name()))]
    async fn run_feed(&self, feed: &dyn Feed) -> FeedResult {
        let mut result = FeedResult {
            feed_name: feed.name().to_string(),
            ..Default::default()
        };

        let output = match feed.fetch().await {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "Feed failed");
                result.errors.push(e.to_string());
                return result;
            }
        };

        result.signals_fetched = output.signals.len();
        result.errors = output.fetch_errors;

        for signal in &output.signals {
            match self.record(signal) {
                Ok((created, write)) => {
                    if created {
                        result.trends_created += 1;
                    }
                    match write {
                        MetricWrite::Inserted => result.metrics_inserted += 1,
                        MetricWrite::Updated => result.metrics_updated += 1,
                        MetricWrite::Unchanged => result.metrics_unchanged += 1,
                    }
                }
                Err(e) => {
                    warn!(topic = %signal.topic, error = %e, "Failed to store signal");
                    result.errors.push(format!("{}: {e}", signal.topic));
                }
            }
        }

        info!(
            fetched = result.signals_fetched,
            new_trends = result.trends_created,
            "Feed ingested"
        );
        result
    }
}
