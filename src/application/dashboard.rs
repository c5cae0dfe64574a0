use crate::domain::entities::signal::SignalRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::signal_repository::{SignalFilter, SignalRepository};
use crate::domain::values::niche::Niche;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Highest-velocity recent signals for each reported niche.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub window_hours: u32,
    pub total_signals: usize,
    pub niches: Vec<NicheTop>,
}

#[derive(Debug, Serialize)]
pub struct NicheTop {
    pub niche: Niche,
    pub signals: Vec<SignalRecord>,
}

pub struct DashboardUseCase {
    repo: Arc<dyn SignalRepository>,
}

impl DashboardUseCase {
    pub fn new(repo: Arc<dyn SignalRepository>) -> Self {
        Self { repo }
    }

    pub fn execute(&self, window_hours: u32, per_niche: usize) -> Result<Dashboard, DomainError> {
        let now = Utc::now();
        let since = now - chrono::Duration::hours(i64::from(window_hours));

        let signals = self.repo.signals(&SignalFilter {
            since: Some(since),
            ..Default::default()
        })?;

        Ok(Dashboard {
            generated_at: now,
            window_hours,
            total_signals: signals.len(),
            niches: top_per_niche(&signals, per_niche),
        })
    }
}

/// First `per_niche` signals of each reported niche, keeping input order.
pub fn top_per_niche(signals: &[SignalRecord], per_niche: usize) -> Vec<NicheTop> {
    Niche::REPORTED
        .iter()
        .map(|niche| NicheTop {
            niche: *niche,
            signals: signals
                .iter()
                .filter(|s| s.niche == *niche)
                .take(per_niche)
                .cloned()
                .collect(),
        })
        .collect()
}
