use super::{Feed, FeedError, FetchOutput, BROWSER_USER_AGENT};
use crate::domain::entities::signal::SignalRecord;
use crate::domain::values::niche::Niche;
use crate::domain::values::platform::Platform;
use crate::domain::values::velocity::google_velocity;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info};

/// Anti-JSON-hijacking guard Google prepends to API responses.
const XSSI_PREFIX: &str = ")]}',";

/// Today and yesterday.
const DAYS_TO_READ: usize = 2;

const NICHE_KEYWORDS: &[(Niche, &[&str])] = &[
    (
        Niche::Cinema,
        &[
            "film", "movie", "trailer", "netflix", "série", "cinéma", "acteur", "actrice",
            "disney", "marvel", "hbo", "prime video", "star wars", "dc", "oscar", "cannes",
        ],
    ),
    (
        Niche::Sport,
        &[
            "match", "score", "goal", "ufc", "nba", "football", "ligue", "jo", "athlète", "vs",
            "prix", "course", "tennis", "f1", "psg", "real madrid", "champions league",
            "olympique", "transfert", "blessure",
        ],
    ),
    (
        Niche::Music,
        &[
            "lyrics", "concert", "album", "song", "feat", "rap", "musique", "clip", "chanteur",
            "chanteuse", "grammy", "spotify", "tournée", "tour", "single",
        ],
    ),
];

/// Google Trends daily trending searches (public JSON endpoint, no auth).
pub struct GoogleTrendsFeed {
    geo: String,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleTrendsFeed {
    pub fn new(geo: impl Into<String>) -> Self {
        Self {
            geo: geo.into(),
            base_url: "https://trends.google.com/trends/api".into(),
            client: reqwest::Client::builder()
                .user_agent(BROWSER_USER_AGENT)
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct DailyTrendsResponse {
    #[serde(default)]
    default: DailyTrendsDefault,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyTrendsDefault {
    #[serde(default)]
    trending_searches_days: Vec<TrendingDay>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendingDay {
    #[serde(default)]
    trending_searches: Vec<TrendingSearch>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendingSearch {
    #[serde(default)]
    title: SearchTitle,
    #[serde(default)]
    formatted_traffic: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct SearchTitle {
    #[serde(default)]
    query: String,
}

#[derive(Debug, serde::Deserialize)]
struct Article {
    #[serde(default)]
    title: String,
}

/// Convert Google's formatted traffic (`"200K+"`, `"1M+"`, `"5,000+"`) to a count.
/// Unparsable input yields 0.
pub fn parse_volume(traffic: &str) -> u64 {
    let s = traffic.replace([',', '+'], "");
    let s = s.trim();
    let scaled = |digits: &str, factor: f64| -> u64 {
        digits
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| (v * factor) as u64)
            .unwrap_or(0)
    };
    match s.chars().last().map(|c| c.to_ascii_uppercase()) {
        Some('K') => scaled(&s[..s.len() - 1], 1_000.0),
        Some('M') => scaled(&s[..s.len() - 1], 1_000_000.0),
        _ => s.parse().unwrap_or(0),
    }
}

/// Parse a raw daily-trends body into signals, ranked in list order.
pub fn parse_daily_trends(body: &str) -> Result<FetchOutput, FeedError> {
    let json = body.trim_start().strip_prefix(XSSI_PREFIX).unwrap_or(body);
    let data: DailyTrendsResponse =
        serde_json::from_str(json).map_err(|e| FeedError::Parse(e.to_string()))?;

    let searches: Vec<TrendingSearch> = data
        .default
        .trending_searches_days
        .into_iter()
        .take(DAYS_TO_READ)
        .flat_map(|day| day.trending_searches)
        .collect();

    let total = searches.len();
    let now = Utc::now();
    let mut output = FetchOutput::default();

    for (rank, item) in searches.into_iter().enumerate() {
        let topic = item.title.query;
        let volume = parse_volume(item.formatted_traffic.as_deref().unwrap_or("0"));
        let context = item.articles.first().map(|a| a.title.as_str()).unwrap_or("");
        let niche = Niche::classify(&format!("{topic} {context}"), NICHE_KEYWORDS);
        let velocity = google_velocity(volume, rank, total);

        match SignalRecord::new(topic, niche, Platform::Google, volume, velocity, now) {
            Ok(signal) => output.signals.push(signal),
            Err(e) => {
                debug!(rank, error = %e, "Skipping invalid Google trend");
                output.fetch_errors.push(format!("rank {rank}: {e}"));
            }
        }
    }

    Ok(output)
}

#[async_trait]
impl Feed for GoogleTrendsFeed {
    fn name(&self) -> &str {
        "google_trends"
    }

    async fn fetch(&self) -> Result<FetchOutput, FeedError> {
        let hl = self.geo.to_lowercase();
        let resp = self
            .client
            .get(format!("{}/dailytrends", self.base_url))
            .query(&[("hl", hl.as_str()), ("geo", self.geo.as_str()), ("ns", "15")])
            .header("Accept", "application/json, text/plain, */*")
            .header(
                "Referer",
                format!(
                    "https://trends.google.com/trends/trendingsearches/daily?geo={}&hl={hl}",
                    self.geo
                ),
            )
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FeedError::Network(format!(
                "Google Trends returned {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        let output = parse_daily_trends(&body)?;
        info!(signals = output.signals.len(), geo = %self.geo, "Fetched Google daily trends");
        Ok(output)
    }
}
