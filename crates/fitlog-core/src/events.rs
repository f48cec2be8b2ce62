use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::adherence::ActivityKind;

/// Every state change in the reminder clock produces an Event.
/// The presentation layer polls for events; notifiers subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Reminder entered the warning window, or its countdown value changed.
    CountdownUpdated {
        reminder_id: i64,
        kind: ActivityKind,
        minutes_until: u32,
        at: DateTime<Utc>,
    },
    /// Reminder left the warning window without firing.
    CountdownCleared {
        reminder_id: i64,
        at: DateTime<Utc>,
    },
    /// Due time reached with the activity unsatisfied; the alarm is ringing
    /// and must be explicitly acknowledged.
    AlarmTriggered {
        reminder_id: i64,
        kind: ActivityKind,
        message: String,
        at: DateTime<Utc>,
    },
    /// Due time reached but the activity was already satisfied; no alarm
    /// is shown for the rest of the day.
    AlarmSuppressed {
        reminder_id: i64,
        kind: ActivityKind,
        at: DateTime<Utc>,
    },
    /// User dismissed a ringing alarm.
    AlarmAcknowledged {
        reminder_id: i64,
        at: DateTime<Utc>,
    },
    /// Local calendar day changed; all prior-day occurrences were discarded.
    DayRolledOver {
        day: NaiveDate,
        at: DateTime<Utc>,
    },
}
