//! Shared test helpers.

use chrono::{DateTime, Duration, Utc};
use viralradar::config::RadarConfig;
use viralradar::domain::entities::signal::SignalRecord;
use viralradar::domain::values::niche::Niche;
use viralradar::domain::values::platform::Platform;
use viralradar::infrastructure::sqlite::signal_repo::window_start;
use viralradar::ViralRadar;

pub fn setup() -> ViralRadar {
    ViralRadar::open(":memory:", RadarConfig::default()).unwrap()
}

pub fn make_signal(
    topic: &str,
    niche: Niche,
    platform: Platform,
    volume: u64,
    velocity: f64,
) -> SignalRecord {
    SignalRecord::observed_now(topic, niche, platform, volume, velocity).unwrap()
}

pub fn make_signal_at(
    topic: &str,
    niche: Niche,
    platform: Platform,
    volume: u64,
    velocity: f64,
    observed_at: DateTime<Utc>,
) -> SignalRecord {
    SignalRecord::new(topic, niche, platform, volume, velocity, observed_at).unwrap()
}

/// Start of a scan window that lies entirely within the last 24 hours.
pub fn recent_window_start(scan_window: Duration) -> DateTime<Utc> {
    let secs = window_start(&(Utc::now() - Duration::hours(12)), scan_window);
    DateTime::from_timestamp(secs, 0).unwrap()
}
