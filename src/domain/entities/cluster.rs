use crate::domain::entities::signal::SignalRecord;
use crate::domain::values::niche::Niche;
use crate::domain::values::platform::Platform;
use serde::Serialize;
use std::collections::BTreeSet;

/// A group of signal records judged to be the same real-world topic.
///
/// Clusters are ephemeral: rebuilt from scratch on every radar run and never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct TopicCluster {
    /// Label of the anchor record, the first one processed.
    pub main_topic: String,
    /// Inherited from the anchor; every member shares it.
    pub niche: Niche,
    /// Distinct platforms among members, sorted.
    pub platforms: BTreeSet<Platform>,
    /// Members in processing order, anchor first.
    pub members: Vec<SignalRecord>,
    pub total_volume: u64,
    /// Set once by the scoring pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl TopicCluster {
    pub fn anchored_on(anchor: SignalRecord) -> Self {
        Self {
            main_topic: anchor.topic.clone(),
            niche: anchor.niche,
            platforms: BTreeSet::from([anchor.platform.clone()]),
            total_volume: anchor.volume,
            members: vec![anchor],
            score: None,
        }
    }

    pub fn push(&mut self, member: SignalRecord) {
        self.platforms.insert(member.platform.clone());
        self.total_volume = self.total_volume.saturating_add(member.volume);
        self.members.push(member);
    }

    pub fn platform_count(&self) -> usize {
        self.platforms.len()
    }

    /// `"Google + TikTok"`.
    pub fn platform_label(&self) -> String {
        self.platforms
            .iter()
            .map(Platform::as_str)
            .collect::<Vec<_>>()
            .join(" + ")
    }
}
