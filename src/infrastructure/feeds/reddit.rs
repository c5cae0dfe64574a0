use super::{Feed, FeedError, FetchOutput};
use crate::domain::entities::signal::{truncate_topic, SignalRecord};
use crate::domain::values::niche::Niche;
use crate::domain::values::platform::Platform;
use crate::domain::values::velocity::{reddit_virality, REDDIT_MIN_VIRALITY};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::{info, warn};

/// Post titles are cut to this many characters before storage.
const MAX_TITLE_CHARS: usize = 250;

const POSTS_PER_SUBREDDIT: u32 = 20;

/// Subreddits watched for each niche.
const SOURCES: &[(Niche, &[&str])] = &[
    (Niche::Cinema, &["movies", "boxoffice", "netflix", "cine"]),
    (Niche::Sport, &["soccer", "nba", "formula1", "ligue1"]),
    (Niche::Music, &["popheads", "hiphopheads", "music", "kpop"]),
];

/// Reddit "hot" listings through the public JSON API.
pub struct RedditFeed {
    sources: Vec<(Niche, String)>,
    base_url: String,
    /// Pause between subreddit requests.
    request_delay: Duration,
    client: reqwest::Client,
}

impl RedditFeed {
    pub fn new(user_agent: &str) -> Self {
        let sources = SOURCES
            .iter()
            .flat_map(|(niche, subs)| subs.iter().map(move |s| (*niche, s.to_string())))
            .collect();
        Self {
            sources,
            base_url: "https://www.reddit.com".into(),
            request_delay: Duration::from_secs(1),
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }
}

#[derive(Debug, serde::Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, serde::Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, serde::Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, serde::Deserialize)]
struct Post {
    #[serde(default)]
    title: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: i64,
    #[serde(default)]
    stickied: bool,
}

/// Turn one subreddit listing into signals for `niche`.
///
/// Pinned posts are skipped (usually rules, not trends), as is anything whose
/// upvotes + comments fall under [`REDDIT_MIN_VIRALITY`]. Volume is the net
/// upvote count, floored at zero.
pub fn parse_listing(body: &str, niche: Niche) -> Result<Vec<SignalRecord>, FeedError> {
    let listing: Listing =
        serde_json::from_str(body).map_err(|e| FeedError::Parse(e.to_string()))?;
    let now = Utc::now();

    let signals = listing
        .data
        .children
        .into_iter()
        .map(|c| c.data)
        .filter(|p| !p.stickied)
        .filter_map(|post| {
            let virality = reddit_virality(post.score, post.num_comments.max(0));
            if virality < REDDIT_MIN_VIRALITY {
                return None;
            }
            let volume = post.score.max(0) as u64;
            let topic = truncate_topic(&post.title, MAX_TITLE_CHARS);
            SignalRecord::new(topic, niche, Platform::Reddit, volume, virality as f64, now).ok()
        })
        .collect();
    Ok(signals)
}

#[async_trait]
impl Feed for RedditFeed {
    fn name(&self) -> &str {
        "reddit"
    }

    async fn fetch(&self) -> Result<FetchOutput, FeedError> {
        let mut output = FetchOutput::default();

        for (i, (niche, subreddit)) in self.sources.iter().enumerate() {
            if i > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
            match self.fetch_subreddit(subreddit, *niche).await {
                Ok(signals) => {
                    info!(subreddit = %subreddit, signals = signals.len(), "Fetched subreddit");
                    output.signals.extend(signals);
                }
                Err(e) => {
                    let msg = format!("r/{subreddit}: {e}");
                    warn!("Failed to fetch {msg}");
                    output.fetch_errors.push(msg);
                }
            }
        }

        Ok(output)
    }
}

impl RedditFeed {
    async fn fetch_subreddit(
        &self,
        subreddit: &str,
        niche: Niche,
    ) -> Result<Vec<SignalRecord>, FeedError> {
        let resp = self
            .client
            .get(format!("{}/r/{subreddit}/hot.json", self.base_url))
            .query(&[("limit", POSTS_PER_SUBREDDIT)])
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FeedError::Network(format!(
                "Reddit returned {} for r/{subreddit}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;
        parse_listing(&body, niche)
    }
}
