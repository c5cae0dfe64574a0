use crate::domain::values::niche::Niche;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted topic. One row per distinct topic label; metrics hang off it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trend {
    pub id: String,
    pub topic: String,
    pub niche: Niche,
    pub first_detected: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Trend {
    pub fn new(topic: String, niche: Niche, detected_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            topic,
            niche,
            first_detected: detected_at,
            last_updated: detected_at,
        }
    }
}

/// Outcome of an idempotent metric write for one topic+platform+scan window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricWrite {
    /// First observation in this window.
    Inserted,
    /// Replaced a weaker observation (smaller volume) in the same window.
    Updated,
    /// An observation at least as strong already exists.
    Unchanged,
}
