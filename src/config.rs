//! Runtime configuration, read from the environment.

use crate::application::clustering::{ClusterSettings, DEFAULT_MIN_PLATFORMS};
use crate::domain::error::DomainError;
use crate::domain::values::platform::PlatformWeights;
use crate::domain::values::similarity::DEFAULT_SIMILARITY_THRESHOLD;
use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

impl From<ConfigError> for DomainError {
    fn from(e: ConfigError) -> Self {
        DomainError::Config(e.to_string())
    }
}

/// Engine and storage tuning handed to the library.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarConfig {
    pub cluster: ClusterSettings,
    /// How far back signals are read for a radar run.
    pub recency_window: Duration,
    /// Dedup granularity for stored metrics.
    pub scan_window: Duration,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            cluster: ClusterSettings::default(),
            recency_window: Duration::hours(24),
            scan_window: Duration::hours(4),
        }
    }
}

impl RadarConfig {
    pub fn recency_hours(&self) -> u32 {
        u32::try_from(self.recency_window.num_hours()).unwrap_or(u32::MAX)
    }
}

/// Everything the binary needs: database location, logging and feed settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub log_level: String,
    pub radar: RadarConfig,
    pub google_geo: String,
    pub reddit_user_agent: String,
    pub tiktok_endpoint: Option<String>,
}

/// Load configuration, reading a `.env` file first if one exists.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Parse configuration from an env-var lookup. Decoupled from the process
/// environment so tests can feed a map.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };
    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let threshold_var = "VIRALRADAR_SIMILARITY_THRESHOLD";
    let similarity_threshold: f64 = or_default(threshold_var, &DEFAULT_SIMILARITY_THRESHOLD.to_string())
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(threshold_var, e.to_string()))?;
    // Zero would let token-less topics match on an empty overlap.
    if !(similarity_threshold > 0.0 && similarity_threshold <= 1.0) {
        return Err(invalid(
            threshold_var,
            format!("must be above 0.0 and at most 1.0, got {similarity_threshold}"),
        ));
    }

    let min_platforms_var = "VIRALRADAR_MIN_PLATFORMS";
    let min_platforms: usize = or_default(min_platforms_var, &DEFAULT_MIN_PLATFORMS.to_string())
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid(min_platforms_var, e.to_string()))?;
    if min_platforms == 0 {
        return Err(invalid(min_platforms_var, "must be at least 1".into()));
    }

    let weights_var = "VIRALRADAR_PLATFORM_WEIGHTS";
    let platform_weights = match lookup(weights_var) {
        Ok(raw) => PlatformWeights::parse(&raw).map_err(|e| invalid(weights_var, e))?,
        Err(_) => PlatformWeights::default(),
    };

    let parse_hours = |var: &str, default: &str| -> Result<Duration, ConfigError> {
        let hours: u32 = or_default(var, default)
            .parse()
            .map_err(|e: std::num::ParseIntError| invalid(var, e.to_string()))?;
        if hours == 0 {
            return Err(invalid(var, "must be at least 1 hour".into()));
        }
        Ok(Duration::hours(i64::from(hours)))
    };

    let recency_window = parse_hours("VIRALRADAR_RECENCY_HOURS", "24")?;
    let scan_window = parse_hours("VIRALRADAR_SCAN_WINDOW_HOURS", "4")?;

    Ok(AppConfig {
        db_path: or_default("VIRALRADAR_DB", "./viral_data.db"),
        log_level: or_default("VIRALRADAR_LOG_LEVEL", "info"),
        radar: RadarConfig {
            cluster: ClusterSettings {
                similarity_threshold,
                min_platforms,
                platform_weights,
            },
            recency_window,
            scan_window,
        },
        google_geo: or_default("VIRALRADAR_GOOGLE_GEO", "FR"),
        reddit_user_agent: or_default("VIRALRADAR_REDDIT_USER_AGENT", "ViralRadar/0.1"),
        tiktok_endpoint: lookup("VIRALRADAR_TIKTOK_ENDPOINT")
            .ok()
            .filter(|s| !s.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::platform::Platform;
    use std::collections::HashMap;

    fn build(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        build_app_config(|key| map.get(key).cloned().ok_or(std::env::VarError::NotPresent))
    }

    #[test]
    fn test_defaults() {
        let cfg = build(&[]).unwrap();
        assert_eq!(cfg.db_path, "./viral_data.db");
        assert_eq!(cfg.radar, RadarConfig::default());
        assert_eq!(cfg.radar.recency_hours(), 24);
        assert!(cfg.tiktok_endpoint.is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = build(&[
            ("VIRALRADAR_SIMILARITY_THRESHOLD", "0.3"),
            ("VIRALRADAR_MIN_PLATFORMS", "3"),
            ("VIRALRADAR_PLATFORM_WEIGHTS", "Reddit=2.0"),
            ("VIRALRADAR_SCAN_WINDOW_HOURS", "1"),
        ])
        .unwrap();
        assert_eq!(cfg.radar.cluster.similarity_threshold, 0.3);
        assert_eq!(cfg.radar.cluster.min_platforms, 3);
        assert_eq!(cfg.radar.cluster.platform_weights.weight(&Platform::Reddit), 2.0);
        assert_eq!(cfg.radar.cluster.platform_weights.weight(&Platform::Google), 1.0);
        assert_eq!(cfg.radar.scan_window, Duration::hours(1));
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let err = build(&[("VIRALRADAR_SIMILARITY_THRESHOLD", "1.5")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { var, .. } if var == "VIRALRADAR_SIMILARITY_THRESHOLD"));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let err = build(&[("VIRALRADAR_SIMILARITY_THRESHOLD", "0.0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { var, .. } if var == "VIRALRADAR_SIMILARITY_THRESHOLD"));
        assert!(build(&[("VIRALRADAR_SIMILARITY_THRESHOLD", "1.0")]).is_ok());
    }

    #[test]
    fn test_rejects_zero_values() {
        assert!(build(&[("VIRALRADAR_MIN_PLATFORMS", "0")]).is_err());
        assert!(build(&[("VIRALRADAR_RECENCY_HOURS", "0")]).is_err());
        assert!(build(&[("VIRALRADAR_SCAN_WINDOW_HOURS", "abc")]).is_err());
    }

    #[test]
    fn test_config_error_converts_to_domain_error() {
        let err: DomainError = build(&[("VIRALRADAR_MIN_PLATFORMS", "x")]).unwrap_err().into();
        assert!(matches!(err, DomainError::Config(msg) if msg.contains("VIRALRADAR_MIN_PLATFORMS")));
    }
}
