use super::{Feed, FeedError, FetchOutput, BROWSER_USER_AGENT};
use crate::domain::entities::signal::SignalRecord;
use crate::domain::values::niche::Niche;
use crate::domain::values::platform::Platform;
use crate::domain::values::velocity::tiktok_velocity;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

const NICHE_KEYWORDS: &[(Niche, &[&str])] = &[
    (
        Niche::Cinema,
        &[
            "movie", "netflix", "film", "actor", "cinema", "disney", "series", "show", "marvel",
            "trailer", "premiere", "oscar", "hbo", "anime",
        ],
    ),
    (
        Niche::Sport,
        &[
            "football", "nba", "sport", "fitness", "gym", "ufc", "soccer", "basketball", "f1",
            "tennis", "running", "workout", "match", "goal",
        ],
    ),
    (
        Niche::Music,
        &[
            "song", "music", "concert", "lyrics", "rap", "pop", "singer", "album", "dj", "beat",
            "dance", "kpop", "hiphop", "remix",
        ],
    ),
];

/// TikTok Creative Center trending hashtags.
///
/// Reads the JSON list endpoint directly (`{"data": {"list": [...]}}`); the
/// endpoint must be configured since the public page only exposes it to a
/// browser session.
pub struct TikTokFeed {
    endpoint: Option<String>,
    client: reqwest::Client,
}

impl TikTokFeed {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::builder()
                .user_agent(BROWSER_USER_AGENT)
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }
}

/// View counts arrive as numbers or as strings like `"1,234+"`.
fn view_count(item: &Value) -> u64 {
    let raw = [item.get("view_count"), item.get("video_views")]
        .into_iter()
        .flatten()
        .find(|v| !v.is_null() && v.as_u64() != Some(0) && v.as_str() != Some(""));
    match raw {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.replace([',', '+'], "").trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn hashtag_name(item: &Value) -> Option<&str> {
    ["hashtag_name", "name"]
        .into_iter()
        .filter_map(|key| item.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Parse a Creative Center hashtag list into signals. Rank is the position in
/// the full list, nameless items included.
pub fn parse_hashtags(body: &str) -> Result<FetchOutput, FeedError> {
    let data: Value = serde_json::from_str(body).map_err(|e| FeedError::Parse(e.to_string()))?;
    let items = data
        .pointer("/data/list")
        .and_then(Value::as_array)
        .ok_or_else(|| FeedError::Parse("missing data.list".into()))?;

    let total = items.len();
    let now = Utc::now();
    let mut output = FetchOutput::default();

    for (rank, item) in items.iter().enumerate() {
        let Some(name) = hashtag_name(item) else {
            continue;
        };
        let views = view_count(item);
        let niche = Niche::classify(name, NICHE_KEYWORDS);
        let velocity = tiktok_velocity(views, rank, total);

        match SignalRecord::new(format!("#{name}"), niche, Platform::TikTok, views, velocity, now) {
            Ok(signal) => output.signals.push(signal),
            Err(e) => output.fetch_errors.push(format!("#{name}: {e}")),
        }
    }

    Ok(output)
}

#[async_trait]
impl Feed for TikTokFeed {
    fn name(&self) -> &str {
        "tiktok"
    }

    async fn fetch(&self) -> Result<FetchOutput, FeedError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| FeedError::Config("VIRALRADAR_TIKTOK_ENDPOINT is not set".into()))?;

        let resp = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FeedError::Network(format!(
                "TikTok Creative Center returned {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        let output = parse_hashtags(&body)?;
        info!(signals = output.signals.len(), "Fetched TikTok hashtags");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hashtags() {
        let body = r#"{"data": {"list": [
            {"hashtag_name": "GTA6Leak", "view_count": 200000},
            {"name": "nbafinals", "video_views": "1,500,000"},
            {"hashtag_name": "", "view_count": 5},
            {"hashtag_name": "kpopdance", "view_count": null, "video_views": 3000}
        ]}}"#;

        let out = parse_hashtags(body).unwrap();
        assert_eq!(out.signals.len(), 3);
        assert_eq!(out.signals[0].topic, "#GTA6Leak");
        assert_eq!(out.signals[0].volume, 200_000);
        assert_eq!(out.signals[1].niche, Niche::Sport);
        assert_eq!(out.signals[1].volume, 1_500_000);
        assert_eq!(out.signals[2].niche, Niche::Music);
        assert_eq!(out.signals[2].volume, 3_000);
        assert!(out.signals.iter().all(|s| s.velocity_score >= 50.0));
    }

    #[test]
    fn test_parse_hashtags_requires_list() {
        assert!(parse_hashtags(r#"{"data": {}}"#).is_err());
    }

    #[tokio::test]
    async fn test_fetch_without_endpoint_is_config_error() {
        let feed = TikTokFeed::new(None);
        assert!(matches!(feed.fetch().await, Err(FeedError::Config(_))));
    }
}
