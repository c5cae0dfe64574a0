//! Radar use case: loads the recent signal window and runs the clustering
//! engine over it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::application::clustering::{cluster_signals, rank_clusters};
use crate::config::RadarConfig;
use crate::domain::entities::cluster::TopicCluster;
use crate::domain::error::DomainError;
use crate::domain::ports::signal_repository::{SignalFilter, SignalOrder, SignalRepository};

/// Result of one radar run.
#[derive(Debug, Serialize)]
pub struct RadarScan {
    pub scanned_at: DateTime<Utc>,
    pub window_hours: u32,
    pub signals_scanned: usize,
    pub clusters_formed: usize,
    pub total_opportunities: usize,
    pub opportunities: Vec<TopicCluster>,
}

pub struct RadarUseCase {
    repo: Arc<dyn SignalRepository>,
    config: RadarConfig,
}

impl RadarUseCase {
    pub fn new(repo: Arc<dyn SignalRepository>, config: RadarConfig) -> Self {
        Self { repo, config }
    }

    /// Rank cross-platform opportunities among signals from the last
    /// `window_hours` (configured recency window when `None`).
    ///
    /// `result_limit` caps how many opportunities are returned; the counts in
    /// the scan are taken before truncation.
    #[tracing::instrument(skip(self))]
    pub fn execute(
        &self,
        window_hours: Option<u32>,
        order: SignalOrder,
        result_limit: Option<usize>,
    ) -> Result<RadarScan, DomainError> {
        let now = Utc::now();
        let window_hours = window_hours.unwrap_or_else(|| self.config.recency_hours());
        let since = now - chrono::Duration::hours(i64::from(window_hours));

        let signals = self.repo.signals(&SignalFilter {
            since: Some(since),
            order,
            ..Default::default()
        })?;
        let signals_scanned = signals.len();

        if signals.is_empty() {
            info!("No recent signals to analyse");
        }

        let clusters = cluster_signals(signals, self.config.cluster.similarity_threshold);
        let clusters_formed = clusters.len();
        let mut opportunities = rank_clusters(clusters, &self.config.cluster);
        let total_opportunities = opportunities.len();

        if let Some(max) = result_limit {
            opportunities.truncate(max);
        }

        info!(
            signals = signals_scanned,
            clusters = clusters_formed,
            opportunities = total_opportunities,
            "Radar scan complete"
        );

        Ok(RadarScan {
            scanned_at: now,
            window_hours,
            signals_scanned,
            clusters_formed,
            total_opportunities,
            opportunities,
        })
    }
}
