//! Per-day alarm occurrence state.
//!
//! An occurrence is the lifecycle of one reminder on one calendar day:
//!
//! ```text
//! Scheduled -> Imminent -> Ringing -> Acknowledged
//!                      \-> Suppressed (activity already satisfied)
//! ```
//!
//! `Ringing` does not auto-expire and is idempotent to repeated trigger
//! calls; the only exits are explicit acknowledgment or day rollover.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::adherence::ActivityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlarmPhase {
    /// Not yet within the warning window.
    Scheduled,
    /// Within the warning window; countdown visible.
    Imminent,
    /// Due time reached with the activity unsatisfied. Requires explicit
    /// acknowledgment.
    Ringing,
    /// User dismissed the alarm.
    Acknowledged,
    /// Due time reached but the activity was already satisfied; never shown.
    Suppressed,
}

/// Ephemeral state for one reminder on one calendar day. Discarded at day
/// rollover.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occurrence {
    pub reminder_id: i64,
    pub day: NaiveDate,
    pub phase: AlarmPhase,
    pub kind: ActivityKind,
    pub message: String,
    /// Countdown shown while `Imminent`.
    pub minutes_until: Option<u32>,
    /// Whether the due minute has been evaluated for this day. Guards the
    /// ring-exactly-once invariant across however many ticks observe the
    /// due minute.
    #[serde(default)]
    pub due_evaluated: bool,
    pub triggered_at: Option<DateTime<Utc>>,
    pub acknowledged_at: Option<DateTime<Utc>>,
}

impl Occurrence {
    pub fn new(reminder_id: i64, day: NaiveDate, kind: ActivityKind, message: String) -> Self {
        Self {
            reminder_id,
            day,
            phase: AlarmPhase::Scheduled,
            kind,
            message,
            minutes_until: None,
            due_evaluated: false,
            triggered_at: None,
            acknowledged_at: None,
        }
    }

    /// Enter or refresh the countdown. Only meaningful before the due
    /// evaluation; a resolved occurrence keeps its phase.
    pub fn enter_imminent(&mut self, minutes_until: u32) -> bool {
        match self.phase {
            AlarmPhase::Scheduled | AlarmPhase::Imminent => {
                let changed =
                    self.phase != AlarmPhase::Imminent || self.minutes_until != Some(minutes_until);
                self.phase = AlarmPhase::Imminent;
                self.minutes_until = Some(minutes_until);
                changed
            }
            _ => false,
        }
    }

    /// Leave the warning window without firing.
    pub fn revert_to_scheduled(&mut self) -> bool {
        if self.phase == AlarmPhase::Imminent {
            self.phase = AlarmPhase::Scheduled;
            self.minutes_until = None;
            true
        } else {
            false
        }
    }

    /// Transition to `Ringing`. Returns `true` only on the first call;
    /// re-triggering an already-ringing or resolved occurrence is a no-op.
    pub fn trigger(&mut self, now: DateTime<Utc>) -> bool {
        match self.phase {
            AlarmPhase::Scheduled | AlarmPhase::Imminent => {
                self.phase = AlarmPhase::Ringing;
                self.minutes_until = None;
                self.triggered_at = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Mark as satisfied at due time; the alarm is never shown.
    pub fn suppress(&mut self) -> bool {
        match self.phase {
            AlarmPhase::Scheduled | AlarmPhase::Imminent => {
                self.phase = AlarmPhase::Suppressed;
                self.minutes_until = None;
                true
            }
            _ => false,
        }
    }

    /// Explicit user dismissal. Only a ringing alarm can be acknowledged.
    pub fn acknowledge(&mut self, now: DateTime<Utc>) -> bool {
        if self.phase == AlarmPhase::Ringing {
            self.phase = AlarmPhase::Acknowledged;
            self.acknowledged_at = Some(now);
            true
        } else {
            false
        }
    }

    /// Resolved occurrences survive outside the warning window and block
    /// any further due evaluation for the day.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self.phase,
            AlarmPhase::Ringing | AlarmPhase::Acknowledged | AlarmPhase::Suppressed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence() -> Occurrence {
        Occurrence::new(
            1,
            NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            ActivityKind::Water,
            "Hydrate".into(),
        )
    }

    #[test]
    fn trigger_is_idempotent() {
        let mut occ = occurrence();
        let now = Utc::now();
        assert!(occ.trigger(now));
        assert_eq!(occ.phase, AlarmPhase::Ringing);
        assert!(!occ.trigger(now));
        assert_eq!(occ.phase, AlarmPhase::Ringing);
    }

    #[test]
    fn acknowledge_only_from_ringing() {
        let mut occ = occurrence();
        let now = Utc::now();
        assert!(!occ.acknowledge(now));
        occ.trigger(now);
        assert!(occ.acknowledge(now));
        assert_eq!(occ.phase, AlarmPhase::Acknowledged);
        // A second acknowledgment is a no-op.
        assert!(!occ.acknowledge(now));
    }

    #[test]
    fn suppressed_occurrence_cannot_ring() {
        let mut occ = occurrence();
        assert!(occ.suppress());
        assert!(!occ.trigger(Utc::now()));
        assert_eq!(occ.phase, AlarmPhase::Suppressed);
    }

    #[test]
    fn countdown_updates_report_changes_only() {
        let mut occ = occurrence();
        assert!(occ.enter_imminent(8));
        assert!(!occ.enter_imminent(8));
        assert!(occ.enter_imminent(7));
        assert_eq!(occ.minutes_until, Some(7));
    }

    #[test]
    fn imminent_reverts_outside_window() {
        let mut occ = occurrence();
        occ.enter_imminent(5);
        assert!(occ.revert_to_scheduled());
        assert_eq!(occ.phase, AlarmPhase::Scheduled);
        assert_eq!(occ.minutes_until, None);
    }

    #[test]
    fn ringing_does_not_revert() {
        let mut occ = occurrence();
        occ.trigger(Utc::now());
        assert!(!occ.revert_to_scheduled());
        assert!(occ.is_resolved());
    }
}
