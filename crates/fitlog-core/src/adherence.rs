//! Daily adherence evaluation.
//!
//! Answers "has this activity already happened today?" from a read-only
//! snapshot of today's logged metrics. The same answer drives both the
//! alarm suppression decision in the reminder clock and the dashboard's
//! "already handled" display, so it lives here as a single pure function.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The activity a reminder monitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Weight,
    Water,
    Sleep,
    Workout,
    /// Unrecognized kind. Always evaluated as unsatisfied so a due
    /// reminder still alerts instead of being silently skipped.
    #[serde(other)]
    Unknown,
}

impl ActivityKind {
    /// Default reminder phrase when the user supplied no message.
    pub fn default_message(&self) -> &'static str {
        match self {
            ActivityKind::Weight => "Time to log your weight",
            ActivityKind::Water => "Time to drink some water",
            ActivityKind::Sleep => "Don't forget to log your sleep",
            ActivityKind::Workout => "Time for a workout",
            ActivityKind::Unknown => "Activity reminder",
        }
    }

    /// Whether today's snapshot already satisfies this activity.
    pub fn is_satisfied_by(&self, snapshot: &DailySnapshot) -> bool {
        match self {
            ActivityKind::Weight => snapshot.weight_kg.is_some(),
            ActivityKind::Water => snapshot.water_ml > 0,
            ActivityKind::Sleep => snapshot.sleep_hours.is_some(),
            ActivityKind::Workout => snapshot.workout_logged,
            ActivityKind::Unknown => false,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActivityKind::Weight => "weight",
            ActivityKind::Water => "water",
            ActivityKind::Sleep => "sleep",
            ActivityKind::Workout => "workout",
            ActivityKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

impl FromStr for ActivityKind {
    type Err = std::convert::Infallible;

    /// Unrecognized strings map to `Unknown` rather than failing, matching
    /// the fail-open evaluation above.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "weight" => ActivityKind::Weight,
            "water" => ActivityKind::Water,
            "sleep" => ActivityKind::Sleep,
            "workout" => ActivityKind::Workout,
            _ => ActivityKind::Unknown,
        })
    }
}

/// Read-only view of today's logged metrics, scoped to exactly one
/// calendar day. Materialized on demand from storage; never mutated here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub weight_kg: Option<f64>,
    pub water_ml: u32,
    pub sleep_hours: Option<f64>,
    pub workout_logged: bool,
}
