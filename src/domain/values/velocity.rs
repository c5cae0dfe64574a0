//! Platform-specific velocity formulas, applied at ingestion time.
//!
//! The clustering engine treats the resulting score as opaque; these only
//! have to be comparable within the same platform.

/// Reddit posts below this combined score are not worth storing.
pub const REDDIT_MIN_VIRALITY: i64 = 100;

/// Anything on TikTok's trending page is already viral.
pub const TIKTOK_VELOCITY_FLOOR: f64 = 50.0;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn log_volume(volume: u64) -> f64 {
    (volume.max(1) as f64).log10()
}

/// Share of the list ranked below position `rank` (0-based), in [0, 1].
fn rank_share(rank: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (total.saturating_sub(rank) as f64 / total as f64).max(0.0)
}

/// Google daily trends: log-scaled search volume plus a boost for ranking
/// high in Google's own list. 200K at rank 0 of 20 scores ~136.
pub fn google_velocity(volume: u64, rank: usize, total: usize) -> f64 {
    round1(log_volume(volume) * 20.0 + rank_share(rank, total) * 30.0)
}

/// TikTok Creative Center: log-scaled views plus a position bonus,
/// floored at [`TIKTOK_VELOCITY_FLOOR`].
pub fn tiktok_velocity(views: u64, rank: usize, total: usize) -> f64 {
    let raw = log_volume(views) * 15.0 + rank_share(rank, total.max(1)) * 40.0;
    round1(raw.max(TIKTOK_VELOCITY_FLOOR))
}

/// Reddit hot posts: net upvotes plus comment count. A downvoted post keeps
/// its negative score here, so heavy discussion has to outweigh it.
pub fn reddit_virality(score: i64, comments: i64) -> i64 {
    score.saturating_add(comments)
}
