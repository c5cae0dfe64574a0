pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::briefing::BriefingUseCase;
use crate::application::collect::CollectUseCase;
use crate::application::dashboard::{Dashboard, DashboardUseCase};
use crate::application::radar::{RadarScan, RadarUseCase};
use crate::application::stats::StatsUseCase;
use crate::config::{AppConfig, RadarConfig};
use crate::domain::entities::signal::SignalRecord;
use crate::domain::entities::trend::MetricWrite;
use crate::domain::error::DomainError;
use crate::domain::ports::signal_repository::{
    SignalFilter, SignalOrder, SignalRepository, SignalStats,
};
use crate::infrastructure::feeds::google_trends::GoogleTrendsFeed;
use crate::infrastructure::feeds::reddit::RedditFeed;
use crate::infrastructure::feeds::tiktok::TikTokFeed;
use crate::infrastructure::feeds::{Feed, FeedResult};
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::signal_repo::SqliteSignalRepo;
use chrono::Utc;
use rusqlite::Connection;
use std::sync::Arc;

pub struct ViralRadar {
    repo: Arc<dyn SignalRepository>,
    config: RadarConfig,
    collect_uc: CollectUseCase,
    radar_uc: Arc<RadarUseCase>,
    dashboard_uc: DashboardUseCase,
    briefing_uc: BriefingUseCase,
    stats_uc: StatsUseCase,
}

impl ViralRadar {
    /// Open (or create) the SQLite database at `db_path`. `":memory:"` gives
    /// a throwaway in-memory store.
    pub fn open(db_path: &str, config: RadarConfig) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        let repo: Arc<dyn SignalRepository> = Arc::new(SqliteSignalRepo::new(conn));
        Ok(Self::with_repository(repo, config))
    }

    pub fn with_repository(repo: Arc<dyn SignalRepository>, config: RadarConfig) -> Self {
        let radar_uc = Arc::new(RadarUseCase::new(repo.clone(), config.clone()));
        Self {
            collect_uc: CollectUseCase::new(repo.clone(), config.scan_window),
            dashboard_uc: DashboardUseCase::new(repo.clone()),
            briefing_uc: BriefingUseCase::new(repo.clone(), radar_uc.clone(), config.recency_hours()),
            stats_uc: StatsUseCase::new(repo.clone()),
            radar_uc,
            repo,
            config,
        }
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// Store one signal through the same path feeds use.
    pub fn record_signal(&self, signal: &SignalRecord) -> Result<MetricWrite, DomainError> {
        self.collect_uc.record(signal).map(|(_, write)| write)
    }

    pub async fn collect(&self, feeds: &[Box<dyn Feed>]) -> Vec<FeedResult> {
        self.collect_uc.run(feeds).await
    }

    /// Signals from the last `window_hours`, velocity first.
    pub fn recent_signals(&self, window_hours: u32) -> Result<Vec<SignalRecord>, DomainError> {
        self.repo.signals(&SignalFilter {
            since: Some(Utc::now() - chrono::Duration::hours(i64::from(window_hours))),
            ..Default::default()
        })
    }

    pub fn radar(
        &self,
        window_hours: Option<u32>,
        order: SignalOrder,
        result_limit: Option<usize>,
    ) -> Result<RadarScan, DomainError> {
        self.radar_uc.execute(window_hours, order, result_limit)
    }

    pub fn dashboard(&self, per_niche: usize) -> Result<Dashboard, DomainError> {
        self.dashboard_uc
            .execute(self.config.recency_hours(), per_niche)
    }

    pub fn briefing(&self) -> Result<serde_json::Value, DomainError> {
        self.briefing_uc.briefing()
    }

    /// `None` when there are no recent signals to write about.
    pub fn hook_prompt(&self) -> Result<Option<String>, DomainError> {
        self.briefing_uc.hook_prompt()
    }

    pub fn stats(&self) -> Result<SignalStats, DomainError> {
        self.stats_uc.stats()
    }
}

/// Feeds selected by name (`google`, `reddit`, `tiktok`); all of them when
/// `only` is `None`.
pub fn build_feeds(config: &AppConfig, only: Option<&str>) -> Result<Vec<Box<dyn Feed>>, DomainError> {
    let google = || Box::new(GoogleTrendsFeed::new(config.google_geo.clone())) as Box<dyn Feed>;
    let reddit = || Box::new(RedditFeed::new(&config.reddit_user_agent)) as Box<dyn Feed>;
    let tiktok = || Box::new(TikTokFeed::new(config.tiktok_endpoint.clone())) as Box<dyn Feed>;

    match only.map(|s| s.to_lowercase()) {
        None => Ok(vec![google(), reddit(), tiktok()]),
        Some(name) => match name.as_str() {
            "google" => Ok(vec![google()]),
            "reddit" => Ok(vec![reddit()]),
            "tiktok" => Ok(vec![tiktok()]),
            _ => Err(DomainError::InvalidInput(format!(
                "Unknown platform: {name}. Use google, reddit or tiktok"
            ))),
        },
    }
}
