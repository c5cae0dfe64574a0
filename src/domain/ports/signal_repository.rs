use crate::domain::entities::signal::SignalRecord;
use crate::domain::entities::trend::{MetricWrite, Trend};
use crate::domain::error::DomainError;
use crate::domain::values::niche::Niche;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Processing order handed to the clustering engine. High-signal records
/// come first so they become cluster anchors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalOrder {
    #[default]
    Velocity,
    Volume,
}

#[derive(Debug, Clone, Default)]
pub struct SignalFilter {
    pub since: Option<DateTime<Utc>>,
    pub order: SignalOrder,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SignalStats {
    pub total_trends: usize,
    pub total_metrics: usize,
    pub by_platform: Vec<(String, usize)>,
    pub by_niche: Vec<(String, usize)>,
}

pub trait SignalRepository: Send + Sync {
    /// Insert a trend for `topic`, or bump `last_updated` on the existing one.
    /// Returns the trend and whether it was created by this call.
    fn upsert_trend(
        &self,
        topic: &str,
        niche: Niche,
        at: DateTime<Utc>,
    ) -> Result<(Trend, bool), DomainError>;

    /// Store one observation, keeping at most one metric per
    /// trend+platform+scan window. A later observation replaces the stored
    /// one only if its volume is larger.
    fn record_metric(
        &self,
        trend: &Trend,
        record: &SignalRecord,
        scan_window: Duration,
    ) -> Result<MetricWrite, DomainError>;

    /// Signals joined with their trend, ordered per `filter.order`.
    fn signals(&self, filter: &SignalFilter) -> Result<Vec<SignalRecord>, DomainError>;

    fn stats(&self) -> Result<SignalStats, DomainError>;
}
