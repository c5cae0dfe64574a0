mod common;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use common::{make_signal_at, recent_window_start, setup};
use viralradar::domain::ports::signal_repository::SignalOrder;
use viralradar::domain::values::niche::Niche;
use viralradar::domain::values::platform::Platform;
use viralradar::infrastructure::feeds::{Feed, FeedError, FetchOutput};

struct StaticFeed {
    name: &'static str,
    platform: Platform,
    observed_at: DateTime<Utc>,
}

#[async_trait]
impl Feed for StaticFeed {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch(&self) -> Result<FetchOutput, FeedError> {
        Ok(FetchOutput {
            signals: vec![
                make_signal_at(
                    "Champions League final",
                    Niche::Sport,
                    self.platform.clone(),
                    9_000,
                    80.0,
                    self.observed_at,
                ),
                make_signal_at(
                    "Oscars red carpet",
                    Niche::Cinema,
                    self.platform.clone(),
                    4_000,
                    40.0,
                    self.observed_at,
                ),
            ],
            fetch_errors: vec!["r/unavailable: 403".into()],
        })
    }
}

struct BrokenFeed;

#[async_trait]
impl Feed for BrokenFeed {
    fn name(&self) -> &str {
        "broken"
    }

    async fn fetch(&self) -> Result<FetchOutput, FeedError> {
        Err(FeedError::Network("connection refused".into()))
    }
}

#[tokio::test]
async fn test_collect_stores_every_feed() {
    let vr = setup();
    let feeds: Vec<Box<dyn Feed>> = vec![
        Box::new(StaticFeed {
            name: "google",
            platform: Platform::Google,
            observed_at: Utc::now(),
        }),
        Box::new(BrokenFeed),
        Box::new(StaticFeed {
            name: "reddit",
            platform: Platform::Reddit,
            observed_at: Utc::now(),
        }),
    ];

    let results = vr.collect(&feeds).await;
    assert_eq!(results.len(), 3);

    assert_eq!(results[0].feed_name, "google");
    assert_eq!(results[0].signals_fetched, 2);
    assert_eq!(results[0].trends_created, 2);
    assert_eq!(results[0].metrics_inserted, 2);
    assert_eq!(results[0].errors, vec!["r/unavailable: 403".to_string()]);

    assert_eq!(results[1].signals_fetched, 0);
    assert_eq!(results[1].errors.len(), 1);
    assert!(results[1].errors[0].contains("connection refused"));

    // Same topics again: no new trends, new metrics for the new platform.
    assert_eq!(results[2].trends_created, 0);
    assert_eq!(results[2].metrics_inserted, 2);

    let scan = vr.radar(None, SignalOrder::Velocity, None).unwrap();
    assert_eq!(scan.total_opportunities, 2);
    assert_eq!(scan.opportunities[0].main_topic, "Champions League final");
}

#[tokio::test]
async fn test_collect_twice_in_one_window_does_not_duplicate() {
    let vr = setup();
    let block = recent_window_start(vr.config().scan_window);
    let feed_at = |minutes: i64| -> Vec<Box<dyn Feed>> {
        vec![Box::new(StaticFeed {
            name: "google",
            platform: Platform::Google,
            observed_at: block + Duration::minutes(minutes),
        }) as Box<dyn Feed>]
    };

    let first = vr.collect(&feed_at(5)).await;
    assert_eq!(first[0].metrics_inserted, 2);

    let second = vr.collect(&feed_at(30)).await;
    assert_eq!(second[0].trends_created, 0);
    assert_eq!(second[0].metrics_inserted, 0);
    assert_eq!(second[0].metrics_updated, 0);
    assert_eq!(second[0].metrics_unchanged, 2);
    assert_eq!(vr.stats().unwrap().total_metrics, 2);
}
