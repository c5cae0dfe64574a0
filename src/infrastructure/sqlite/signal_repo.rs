use crate::domain::entities::signal::SignalRecord;
use crate::domain::entities::trend::{MetricWrite, Trend};
use crate::domain::error::DomainError;
use crate::domain::ports::signal_repository::*;
use crate::domain::values::niche::Niche;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;
use tracing::warn;

/// Fixed-width UTC timestamps so text comparison in SQL matches time order.
fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{s}': {e}"))
}

/// Start of the scan window containing `ts`, as unix seconds.
pub fn window_start(ts: &DateTime<Utc>, scan_window: Duration) -> i64 {
    let block = scan_window.num_seconds().max(1);
    ts.timestamp().div_euclid(block) * block
}

/// Row as stored, before validation into a [`SignalRecord`].
struct RawSignalRow {
    topic: Option<String>,
    niche: Option<String>,
    platform: Option<String>,
    volume: Option<i64>,
    velocity_score: Option<f64>,
    observed_at: Option<String>,
}

impl RawSignalRow {
    fn into_record(self) -> Result<SignalRecord, String> {
        let topic = self.topic.ok_or("missing topic")?;
        let niche: Niche = self.niche.ok_or("missing niche")?.parse()?;
        let platform = self.platform.ok_or("missing platform")?.parse()?;
        let volume = self.volume.ok_or("missing volume")?;
        let volume = u64::try_from(volume).map_err(|_| format!("negative volume {volume}"))?;
        let velocity = self.velocity_score.ok_or("missing velocity_score")?;
        let observed_at = parse_ts(&self.observed_at.ok_or("missing observed_at")?)?;
        SignalRecord::new(topic, niche, platform, volume, velocity, observed_at)
            .map_err(|e| e.to_string())
    }
}

pub struct SqliteSignalRepo {
    conn: Mutex<Connection>,
}

impl SqliteSignalRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

impl SignalRepository for SqliteSignalRepo {
    fn upsert_trend(
        &self,
        topic: &str,
        niche: Niche,
        at: DateTime<Utc>,
    ) -> Result<(Trend, bool), DomainError> {
        let conn = self.lock()?;
        let existing = conn
            .query_row(
                "SELECT id, niche, first_detected FROM trends WHERE topic = ?1",
                params![topic],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        match existing {
            Some((id, stored_niche, first_detected)) => {
                conn.execute(
                    "UPDATE trends SET last_updated = ?1 WHERE id = ?2",
                    params![fmt_ts(&at), id],
                )?;
                let trend = Trend {
                    id,
                    topic: topic.to_string(),
                    niche: stored_niche.parse().map_err(DomainError::Parse)?,
                    first_detected: parse_ts(&first_detected).map_err(DomainError::Parse)?,
                    last_updated: at,
                };
                Ok((trend, false))
            }
            None => {
                let trend = Trend::new(topic.to_string(), niche, at);
                conn.execute(
                    "INSERT INTO trends (id, topic, niche, first_detected, last_updated)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        trend.id,
                        trend.topic,
                        trend.niche.to_string(),
                        fmt_ts(&trend.first_detected),
                        fmt_ts(&trend.last_updated),
                    ],
                )
                .map_err(|e| DomainError::Database(format!("Failed to add trend: {e}")))?;
                Ok((trend, true))
            }
        }
    }

    fn record_metric(
        &self,
        trend: &Trend,
        record: &SignalRecord,
        scan_window: Duration,
    ) -> Result<MetricWrite, DomainError> {
        let conn = self.lock()?;
        let window = window_start(&record.observed_at, scan_window);
        let platform = record.platform.to_string();
        let volume = i64::try_from(record.volume)
            .map_err(|_| DomainError::InvalidInput(format!("Volume {} too large", record.volume)))?;

        let existing: Option<(String, i64)> = conn
            .query_row(
                "SELECT id, volume FROM trend_metrics
                 WHERE trend_id = ?1 AND platform = ?2 AND window_start = ?3",
                params![trend.id, platform, window],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match existing {
            None => {
                conn.execute(
                    "INSERT INTO trend_metrics
                     (id, seq, trend_id, platform, volume, velocity_score, observed_at, window_start)
                     VALUES (?1, (SELECT COALESCE(MAX(seq), 0) + 1 FROM trend_metrics),
                             ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        uuid::Uuid::new_v4().to_string(),
                        trend.id,
                        platform,
                        volume,
                        record.velocity_score,
                        fmt_ts(&record.observed_at),
                        window,
                    ],
                )
                .map_err(|e| DomainError::Database(format!("Failed to add metric: {e}")))?;
                Ok(MetricWrite::Inserted)
            }
            Some((id, stored_volume)) if volume > stored_volume => {
                conn.execute(
                    "UPDATE trend_metrics SET volume = ?1, velocity_score = ?2, observed_at = ?3
                     WHERE id = ?4",
                    params![volume, record.velocity_score, fmt_ts(&record.observed_at), id],
                )?;
                Ok(MetricWrite::Updated)
            }
            Some(_) => Ok(MetricWrite::Unchanged),
        }
    }

    fn signals(&self, filter: &SignalFilter) -> Result<Vec<SignalRecord>, DomainError> {
        let conn = self.lock()?;
        let mut sql = String::from(
            "SELECT t.topic, t.niche, m.platform, m.volume, m.velocity_score, m.observed_at
             FROM trend_metrics m JOIN trends t ON t.id = m.trend_id WHERE 1=1",
        );
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(since) = &filter.since {
            sql.push_str(&format!(" AND m.observed_at >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(fmt_ts(since)));
        }

        sql.push_str(match filter.order {
            SignalOrder::Velocity => " ORDER BY m.velocity_score DESC, m.volume DESC, m.seq ASC",
            SignalOrder::Volume => " ORDER BY m.volume DESC, m.velocity_score DESC, m.seq ASC",
        });
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT ?{}", param_values.len() + 1));
            param_values.push(Box::new(limit as i64));
        }

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_refs.as_slice(), |row| {
                Ok(RawSignalRow {
                    topic: row.get(0)?,
                    niche: row.get(1)?,
                    platform: row.get(2)?,
                    volume: row.get(3)?,
                    velocity_score: row.get(4)?,
                    observed_at: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let records = rows
            .into_iter()
            .filter_map(|raw| match raw.into_record() {
                Ok(record) => Some(record),
                Err(reason) => {
                    warn!(%reason, "Skipping malformed signal row");
                    None
                }
            })
            .collect();
        Ok(records)
    }

    fn stats(&self) -> Result<SignalStats, DomainError> {
        let conn = self.lock()?;
        let total_trends: usize = conn.query_row("SELECT COUNT(*) FROM trends", [], |r| r.get(0))?;
        let total_metrics: usize =
            conn.query_row("SELECT COUNT(*) FROM trend_metrics", [], |r| r.get(0))?;

        let group_counts = |sql: &str| -> Result<Vec<(String, usize)>, DomainError> {
            let mut stmt = conn.prepare(sql)?;
            let counts = stmt
                .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, usize>(1)?)))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(counts)
        };

        Ok(SignalStats {
            total_trends,
            total_metrics,
            by_platform: group_counts(
                "SELECT platform, COUNT(*) FROM trend_metrics GROUP BY platform ORDER BY platform",
            )?,
            by_niche: group_counts("SELECT niche, COUNT(*) FROM trends GROUP BY niche ORDER BY niche")?,
        })
    }
}
