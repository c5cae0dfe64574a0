use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS trends (
            id TEXT PRIMARY KEY,
            topic TEXT NOT NULL UNIQUE,
            niche TEXT NOT NULL,
            first_detected TEXT NOT NULL,
            last_updated TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS trend_metrics (
            id TEXT PRIMARY KEY,
            seq INTEGER NOT NULL,
            trend_id TEXT NOT NULL REFERENCES trends(id),
            platform TEXT NOT NULL,
            volume INTEGER NOT NULL,
            velocity_score REAL NOT NULL,
            observed_at TEXT NOT NULL,
            window_start INTEGER NOT NULL,
            UNIQUE (trend_id, platform, window_start)
        );

        CREATE INDEX IF NOT EXISTS idx_trends_niche ON trends(niche);
        CREATE INDEX IF NOT EXISTS idx_metrics_observed ON trend_metrics(observed_at);
        CREATE INDEX IF NOT EXISTS idx_metrics_trend ON trend_metrics(trend_id);
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
