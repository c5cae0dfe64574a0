//! Cross-platform clustering and opportunity scoring.
//!
//! Pure and synchronous: takes an ordered list of signal records plus static
//! settings and returns ranked clusters. No I/O, no state between calls.
//!
//! Grouping is a single greedy pass in which every unassigned record becomes
//! an anchor and absorbs later unassigned records of the same niche that match
//! *the anchor*. Members are not compared to each other, so two members may be
//! joined only through the anchor. The pass is O(n²) in the number of records,
//! which is fine for a 24h window (tens to low hundreds of rows) but is the
//! scaling limit of this module.

use crate::domain::entities::cluster::TopicCluster;
use crate::domain::entities::signal::SignalRecord;
use crate::domain::values::platform::PlatformWeights;
use crate::domain::values::similarity::{TopicFingerprint, DEFAULT_SIMILARITY_THRESHOLD};
use tracing::debug;

/// Default minimum number of distinct platforms for a gold opportunity.
pub const DEFAULT_MIN_PLATFORMS: usize = 2;

/// Exponent of the platform-spread bonus: 2 platforms ≈ 2.83x, 3 ≈ 5.2x.
const PLATFORM_BONUS_EXPONENT: f64 = 1.5;

/// Weight of log10(total volume) in the score.
const VOLUME_COEFFICIENT: f64 = 0.1;

/// Static engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSettings {
    pub similarity_threshold: f64,
    pub min_platforms: usize,
    pub platform_weights: PlatformWeights,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            min_platforms: DEFAULT_MIN_PLATFORMS,
            platform_weights: PlatformWeights::default(),
        }
    }
}

/// Partition `records` into topic clusters, in processing order.
///
/// Every record lands in exactly one cluster and clusters never mix niches.
pub fn cluster_signals(records: Vec<SignalRecord>, similarity_threshold: f64) -> Vec<TopicCluster> {
    let fingerprints: Vec<TopicFingerprint> = records
        .iter()
        .map(|r| TopicFingerprint::new(&r.topic))
        .collect();
    let mut slots: Vec<Option<SignalRecord>> = records.into_iter().map(Some).collect();
    let mut clusters = Vec::new();

    for anchor_idx in 0..slots.len() {
        let Some(anchor) = slots[anchor_idx].take() else {
            continue;
        };
        let anchor_print = &fingerprints[anchor_idx];
        let mut cluster = TopicCluster::anchored_on(anchor);

        for other_idx in anchor_idx + 1..slots.len() {
            let joins = slots[other_idx].as_ref().is_some_and(|other| {
                other.niche == cluster.niche
                    && anchor_print.matches(&fingerprints[other_idx], similarity_threshold)
            });
            if joins {
                if let Some(member) = slots[other_idx].take() {
                    cluster.push(member);
                }
            }
        }

        clusters.push(cluster);
    }

    clusters
}

/// Opportunity score of a cluster:
/// `weighted_velocity × platforms^1.5 × (1 + 0.1 × log10(max(total_volume, 1)))`,
/// rounded to one decimal.
pub fn opportunity_score(cluster: &TopicCluster, weights: &PlatformWeights) -> f64 {
    let weighted_velocity: f64 = cluster
        .members
        .iter()
        .map(|m| m.velocity_score * weights.weight(&m.platform))
        .sum();
    let platform_bonus = (cluster.platform_count() as f64).powf(PLATFORM_BONUS_EXPONENT);
    let volume_factor = (cluster.total_volume.max(1) as f64).log10();
    let raw = weighted_velocity * platform_bonus * (1.0 + volume_factor * VOLUME_COEFFICIENT);
    (raw * 10.0).round() / 10.0
}

/// Cluster `records` and rank the gold opportunities. See [`rank_clusters`].
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn rank_opportunities(
    records: Vec<SignalRecord>,
    settings: &ClusterSettings,
) -> Vec<TopicCluster> {
    rank_clusters(
        cluster_signals(records, settings.similarity_threshold),
        settings,
    )
}

/// Keep clusters spanning at least `min_platforms` platforms, score them, and
/// sort by score descending. Ties keep clustering order.
pub fn rank_clusters(clusters: Vec<TopicCluster>, settings: &ClusterSettings) -> Vec<TopicCluster> {
    let formed = clusters.len();

    let mut gold: Vec<TopicCluster> = clusters
        .into_iter()
        .filter(|c| c.platform_count() >= settings.min_platforms)
        .map(|mut c| {
            c.score = Some(opportunity_score(&c, &settings.platform_weights));
            c
        })
        .collect();

    gold.sort_by(|a, b| {
        let (sa, sb) = (a.score.unwrap_or(0.0), b.score.unwrap_or(0.0));
        sb.total_cmp(&sa)
    });

    debug!(clusters = formed, retained = gold.len(), "Ranked cross-platform clusters");
    gold
}
