use crate::domain::error::DomainError;
use crate::domain::values::niche::Niche;
use crate::domain::values::platform::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest topic label accepted, in characters.
pub const MAX_TOPIC_CHARS: usize = 255;

/// One platform's observation of one topic at one point in time.
///
/// Constructed only through [`SignalRecord::new`], so everything that reaches
/// the clustering engine has already passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub topic: String,
    pub niche: Niche,
    pub platform: Platform,
    pub volume: u64,
    pub velocity_score: f64,
    pub observed_at: DateTime<Utc>,
}

impl SignalRecord {
    pub fn new(
        topic: impl Into<String>,
        niche: Niche,
        platform: Platform,
        volume: u64,
        velocity_score: f64,
        observed_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(DomainError::InvalidInput("Signal topic must not be empty".into()));
        }
        if topic.chars().count() > MAX_TOPIC_CHARS {
            return Err(DomainError::InvalidInput(format!(
                "Signal topic exceeds {MAX_TOPIC_CHARS} characters"
            )));
        }
        if !velocity_score.is_finite() || velocity_score < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "Velocity score must be a non-negative number, got {velocity_score}"
            )));
        }
        Ok(Self {
            topic,
            niche,
            platform,
            volume,
            velocity_score,
            observed_at,
        })
    }

    /// Same as [`SignalRecord::new`] stamped with the current time.
    pub fn observed_now(
        topic: impl Into<String>,
        niche: Niche,
        platform: Platform,
        volume: u64,
        velocity_score: f64,
    ) -> Result<Self, DomainError> {
        Self::new(topic, niche, platform, volume, velocity_score, Utc::now())
    }
}

/// Cut `text` down to at most `max_chars` characters on a char boundary.
pub fn truncate_topic(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
