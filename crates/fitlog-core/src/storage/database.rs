//! SQLite-based record storage.
//!
//! Provides persistent storage for:
//! - Workouts, daily logs and goals
//! - Activity reminders
//! - Key-value store for application state
//!
//! Also materializes the read-only views the reminder clock and the stats
//! module consume: today's snapshot, recent workouts, active reminders.

use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::adherence::DailySnapshot;
use crate::error::DatabaseError;
use crate::reminder::{DaysOfWeek, Reminder, TimeOfDay};
use crate::stats::{
    compute_streak, weekly_aggregate, weight_trend, WeeklyAggregate, WeightSample, WeightTrend,
    WorkoutEntry,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: i64,
    pub workout_type: String,
    pub workout_name: String,
    pub duration_minutes: u32,
    pub calories_burned: u32,
    pub intensity: String,
    pub workout_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    pub log_date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub steps: Option<u32>,
    pub water_ml: Option<u32>,
    pub sleep_hours: Option<f64>,
    pub mood: Option<String>,
    pub notes: Option<String>,
}

impl DailyLog {
    pub fn empty(log_date: NaiveDate) -> Self {
        Self {
            log_date,
            weight_kg: None,
            steps: None,
            water_ml: None,
            sleep_hours: None,
            mood: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub goal_type: String,
    pub target_value: f64,
    pub current_value: f64,
    pub deadline: Option<NaiveDate>,
    pub status: String,
}

impl Goal {
    /// Progress toward the target as a percentage, clamped to [0, 100].
    /// Loss-type goals invert: lower current values mean more progress.
    pub fn progress_pct(&self) -> f64 {
        let pct = if self.goal_type.contains("loss") {
            if self.current_value <= 0.0 {
                0.0
            } else {
                self.target_value / self.current_value * 100.0
            }
        } else if self.target_value <= 0.0 {
            0.0
        } else {
            self.current_value / self.target_value * 100.0
        };
        pct.clamp(0.0, 100.0)
    }
}

/// Dashboard stats payload: today's log, the trailing week, active goals,
/// the weight trend and the workout streak.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSummary {
    pub today: Option<DailyLog>,
    pub this_week: WeeklyAggregate,
    pub active_goals: u32,
    pub weight_progress: WeightTrend,
    pub workout_streak: u32,
}

const DATE_FMT: &str = "%Y-%m-%d";

fn date_str(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

fn parse_date(s: &str) -> Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

/// SQLite database for fitness records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/fitlog/fitlog.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, crate::error::CoreError> {
        let path = super::data_dir()?.join("fitlog.db");
        Ok(Self::open_at(path)?)
    }

    fn open_at(path: std::path::PathBuf) -> Result<Self, DatabaseError> {
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS workouts (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_type     TEXT NOT NULL,
                workout_name     TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                calories_burned  INTEGER NOT NULL,
                intensity        TEXT NOT NULL DEFAULT 'medium',
                workout_date     TEXT NOT NULL,
                notes            TEXT
            );

            CREATE TABLE IF NOT EXISTS daily_logs (
                log_date    TEXT PRIMARY KEY,
                weight_kg   REAL,
                steps       INTEGER,
                water_ml    INTEGER,
                sleep_hours REAL,
                mood        TEXT,
                notes       TEXT
            );

            CREATE TABLE IF NOT EXISTS goals (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                goal_type     TEXT NOT NULL,
                target_value  REAL NOT NULL,
                current_value REAL NOT NULL DEFAULT 0,
                deadline      TEXT,
                status        TEXT NOT NULL DEFAULT 'active'
            );

            CREATE TABLE IF NOT EXISTS reminders (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                activity_kind TEXT NOT NULL,
                time_of_day   TEXT NOT NULL,
                message       TEXT,
                days_of_week  TEXT NOT NULL DEFAULT 'all',
                is_active     INTEGER NOT NULL DEFAULT 1
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            -- Indexes for common query patterns
            CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts(workout_date);
            CREATE INDEX IF NOT EXISTS idx_reminders_time ON reminders(time_of_day);",
        )?;
        Ok(())
    }

    // ── Workouts ─────────────────────────────────────────────────────

    /// Record a workout.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    #[allow(clippy::too_many_arguments)]
    pub fn add_workout(
        &self,
        workout_type: &str,
        workout_name: &str,
        duration_minutes: u32,
        calories_burned: u32,
        intensity: &str,
        workout_date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO workouts (workout_type, workout_name, duration_minutes, calories_burned,
                                   intensity, workout_date, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                workout_type,
                workout_name,
                duration_minutes,
                calories_burned,
                intensity,
                date_str(workout_date),
                notes,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent workouts, newest first, capped at 100.
    pub fn list_workouts(&self) -> Result<Vec<WorkoutRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, workout_type, workout_name, duration_minutes, calories_burned,
                    intensity, workout_date, notes
             FROM workouts
             ORDER BY workout_date DESC, id DESC
             LIMIT 100",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(WorkoutRecord {
                id: row.get(0)?,
                workout_type: row.get(1)?,
                workout_name: row.get(2)?,
                duration_minutes: row.get(3)?,
                calories_burned: row.get(4)?,
                intensity: row.get(5)?,
                workout_date: parse_date(&row.get::<_, String>(6)?)?,
                notes: row.get(7)?,
            })
        })?;
        rows.collect()
    }

    /// Delete a workout. Returns `true` if a row was removed.
    pub fn delete_workout(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let n = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    /// Workouts dated on or after `date`, as the stats module consumes them.
    pub fn workouts_on_or_after(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<WorkoutEntry>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT workout_date, calories_burned, duration_minutes
             FROM workouts
             WHERE workout_date >= ?1
             ORDER BY workout_date ASC",
        )?;
        let rows = stmt.query_map(params![date_str(date)], |row| {
            Ok(WorkoutEntry {
                date: parse_date(&row.get::<_, String>(0)?)?,
                calories: row.get(1)?,
                duration_minutes: row.get(2)?,
            })
        })?;
        rows.collect()
    }

    /// Distinct workout dates, feeding the streak computation.
    pub fn distinct_workout_dates(&self) -> Result<BTreeSet<NaiveDate>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT workout_date FROM workouts")?;
        let rows = stmt.query_map([], |row| parse_date(&row.get::<_, String>(0)?))?;
        rows.collect()
    }

    // ── Daily logs ───────────────────────────────────────────────────

    pub fn get_daily_log(&self, date: NaiveDate) -> Result<Option<DailyLog>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT log_date, weight_kg, steps, water_ml, sleep_hours, mood, notes
                 FROM daily_logs WHERE log_date = ?1",
                params![date_str(date)],
                |row| {
                    Ok(DailyLog {
                        log_date: parse_date(&row.get::<_, String>(0)?)?,
                        weight_kg: row.get(1)?,
                        steps: row.get(2)?,
                        water_ml: row.get(3)?,
                        sleep_hours: row.get(4)?,
                        mood: row.get(5)?,
                        notes: row.get(6)?,
                    })
                },
            )
            .optional()
    }

    /// Insert or update the log row for its date.
    pub fn upsert_daily_log(&self, log: &DailyLog) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO daily_logs (log_date, weight_kg, steps, water_ml, sleep_hours, mood, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(log_date) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                steps = excluded.steps,
                water_ml = excluded.water_ml,
                sleep_hours = excluded.sleep_hours,
                mood = excluded.mood,
                notes = excluded.notes",
            params![
                date_str(log.log_date),
                log.weight_kg,
                log.steps,
                log.water_ml,
                log.sleep_hours,
                log.mood,
                log.notes,
            ],
        )?;
        Ok(())
    }

    /// Today's log, created empty on first access.
    pub fn today_log(&self) -> Result<DailyLog, rusqlite::Error> {
        let today = Local::now().date_naive();
        if let Some(log) = self.get_daily_log(today)? {
            return Ok(log);
        }
        let log = DailyLog::empty(today);
        self.upsert_daily_log(&log)?;
        Ok(log)
    }

    /// Recent daily logs, newest first, capped at 30.
    pub fn list_daily_logs(&self) -> Result<Vec<DailyLog>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT log_date, weight_kg, steps, water_ml, sleep_hours, mood, notes
             FROM daily_logs
             ORDER BY log_date DESC
             LIMIT 30",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(DailyLog {
                log_date: parse_date(&row.get::<_, String>(0)?)?,
                weight_kg: row.get(1)?,
                steps: row.get(2)?,
                water_ml: row.get(3)?,
                sleep_hours: row.get(4)?,
                mood: row.get(5)?,
                notes: row.get(6)?,
            })
        })?;
        rows.collect()
    }

    fn weight_samples(&self, since: NaiveDate) -> Result<Vec<WeightSample>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT log_date, weight_kg FROM daily_logs
             WHERE weight_kg IS NOT NULL AND log_date >= ?1",
        )?;
        let rows = stmt.query_map(params![date_str(since)], |row| {
            Ok(WeightSample {
                date: parse_date(&row.get::<_, String>(0)?)?,
                weight_kg: row.get(1)?,
            })
        })?;
        rows.collect()
    }

    // ── Goals ────────────────────────────────────────────────────────

    pub fn add_goal(
        &self,
        goal_type: &str,
        target_value: f64,
        current_value: f64,
        deadline: Option<NaiveDate>,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO goals (goal_type, target_value, current_value, deadline)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                goal_type,
                target_value,
                current_value,
                deadline.map(date_str),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_goals(&self) -> Result<Vec<Goal>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, goal_type, target_value, current_value, deadline, status
             FROM goals ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let deadline: Option<String> = row.get(4)?;
            Ok(Goal {
                id: row.get(0)?,
                goal_type: row.get(1)?,
                target_value: row.get(2)?,
                current_value: row.get(3)?,
                deadline: deadline.as_deref().map(parse_date).transpose()?,
                status: row.get(5)?,
            })
        })?;
        rows.collect()
    }

    /// Update a goal's progress and status. Returns `true` if found.
    pub fn update_goal(
        &self,
        id: i64,
        current_value: Option<f64>,
        status: Option<&str>,
    ) -> Result<bool, rusqlite::Error> {
        let n = self.conn.execute(
            "UPDATE goals SET
                current_value = COALESCE(?2, current_value),
                status = COALESCE(?3, status)
             WHERE id = ?1",
            params![id, current_value, status],
        )?;
        Ok(n > 0)
    }

    pub fn delete_goal(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let n = self
            .conn
            .execute("DELETE FROM goals WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    pub fn active_goal_count(&self) -> Result<u32, rusqlite::Error> {
        self.conn.query_row(
            "SELECT COUNT(*) FROM goals WHERE status = 'active'",
            [],
            |row| row.get(0),
        )
    }

    // ── Reminders ────────────────────────────────────────────────────

    pub fn add_reminder(
        &self,
        kind: crate::adherence::ActivityKind,
        time_of_day: TimeOfDay,
        message: Option<&str>,
        days_of_week: DaysOfWeek,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO reminders (activity_kind, time_of_day, message, days_of_week)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                kind.to_string(),
                time_of_day.to_string(),
                message,
                days_of_week.to_string(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All reminders ordered by time of day. Rows that no longer parse are
    /// skipped with a warning rather than failing the whole listing.
    pub fn list_reminders(&self) -> Result<Vec<Reminder>, rusqlite::Error> {
        self.query_reminders(
            "SELECT id, activity_kind, time_of_day, message, days_of_week, is_active
             FROM reminders ORDER BY time_of_day",
        )
    }

    /// The active reminder set the clock evaluates each tick.
    pub fn list_active_reminders(&self) -> Result<Vec<Reminder>, rusqlite::Error> {
        self.query_reminders(
            "SELECT id, activity_kind, time_of_day, message, days_of_week, is_active
             FROM reminders WHERE is_active = 1 ORDER BY time_of_day",
        )
    }

    fn query_reminders(&self, sql: &str) -> Result<Vec<Reminder>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, bool>(5)?,
            ))
        })?;

        let mut reminders = Vec::new();
        for row in rows {
            let (id, kind, time, message, days, is_active) = row?;
            let time_of_day = match time.parse::<TimeOfDay>() {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(reminder_id = id, error = %e, "skipping malformed reminder");
                    continue;
                }
            };
            let days_of_week = match days.parse::<DaysOfWeek>() {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(reminder_id = id, error = %e, "skipping malformed reminder");
                    continue;
                }
            };
            reminders.push(Reminder {
                id,
                // ActivityKind parsing is infallible; unknown kinds stay
                // alertable.
                activity_kind: kind.parse().unwrap_or(crate::adherence::ActivityKind::Unknown),
                time_of_day,
                message,
                days_of_week,
                is_active,
            });
        }
        Ok(reminders)
    }

    /// Update a reminder's time, message or active flag. Returns `true` if
    /// found.
    pub fn update_reminder(
        &self,
        id: i64,
        time_of_day: Option<TimeOfDay>,
        message: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<bool, rusqlite::Error> {
        let n = self.conn.execute(
            "UPDATE reminders SET
                time_of_day = COALESCE(?2, time_of_day),
                message = COALESCE(?3, message),
                is_active = COALESCE(?4, is_active)
             WHERE id = ?1",
            params![id, time_of_day.map(|t| t.to_string()), message, is_active],
        )?;
        Ok(n > 0)
    }

    pub fn delete_reminder(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let n = self
            .conn
            .execute("DELETE FROM reminders WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    // ── Snapshots & stats ────────────────────────────────────────────

    /// The adherence snapshot for one calendar day.
    pub fn snapshot_for(&self, date: NaiveDate) -> Result<DailySnapshot, rusqlite::Error> {
        let log = self.get_daily_log(date)?;
        let workout_logged: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM workouts WHERE workout_date = ?1)",
            params![date_str(date)],
            |row| row.get(0),
        )?;
        Ok(DailySnapshot {
            weight_kg: log.as_ref().and_then(|l| l.weight_kg),
            water_ml: log.as_ref().and_then(|l| l.water_ml).unwrap_or(0),
            sleep_hours: log.as_ref().and_then(|l| l.sleep_hours),
            workout_logged,
        })
    }

    /// Today's adherence snapshot in local wall-clock time.
    pub fn today_snapshot(&self) -> Result<DailySnapshot, rusqlite::Error> {
        self.snapshot_for(Local::now().date_naive())
    }

    /// The dashboard summary as of `today`.
    pub fn stats_summary_for(&self, today: NaiveDate) -> Result<StatsSummary, rusqlite::Error> {
        let week_entries = self.workouts_on_or_after(today - chrono::Duration::days(7))?;
        let samples = self.weight_samples(today - chrono::Duration::days(14))?;
        let dates = self.distinct_workout_dates()?;
        Ok(StatsSummary {
            today: self.get_daily_log(today)?,
            this_week: weekly_aggregate(&week_entries, today),
            active_goals: self.active_goal_count()?,
            weight_progress: weight_trend(&samples, today),
            workout_streak: compute_streak(&dates, today),
        })
    }

    pub fn stats_summary(&self) -> Result<StatsSummary, rusqlite::Error> {
        self.stats_summary_for(Local::now().date_naive())
    }

    // ── KV store ─────────────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
