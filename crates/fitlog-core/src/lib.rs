//! # Fitlog Core Library
//!
//! This library provides the core business logic for the fitlog fitness
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI layer being a thin
//! presentation shell over the same core library.
//!
//! ## Architecture
//!
//! - **Reminder Clock**: A wall-clock-based alarm state machine that requires
//!   the caller to periodically invoke `tick()` for countdown and alarm
//!   evaluation
//! - **Adherence**: Pure evaluation of whether a monitored activity has
//!   already been logged for the current day
//! - **Stats**: Workout streak and rolling weekly/30-day aggregations
//! - **Storage**: SQLite-based record storage and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ReminderClock`]: Core reminder/alarm state machine
//! - [`Database`]: Workout, daily log, goal and reminder persistence
//! - [`Config`]: Application configuration management
//! - [`Notify`]: Trait for notification delivery collaborators

pub mod adherence;
pub mod error;
pub mod events;
pub mod notify;
pub mod reminder;
pub mod stats;
pub mod storage;

pub use adherence::{ActivityKind, DailySnapshot};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use notify::{LogNotify, Notify};
pub use reminder::{
    AlarmPhase, ClockConfig, DaysOfWeek, Occurrence, Reminder, ReminderClock, TickContext,
    TimeOfDay,
};
pub use stats::{
    compute_streak, daily_totals, weekly_aggregate, weight_trend, DailyTotal, WeeklyAggregate,
    WeightSample, WeightTrend, WorkoutEntry,
};
pub use storage::{Config, DailyLog, Database, Goal, StatsSummary, WorkoutRecord};
