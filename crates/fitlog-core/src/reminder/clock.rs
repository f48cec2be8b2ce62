//! Reminder clock implementation.
//!
//! The clock is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically
//! with a freshly built [`TickContext`], so each tick is a pure function of
//! (time, reminders, snapshot) plus the clock's private occurrence map.
//!
//! ## Tick outline
//!
//! ```ignore
//! let mut clock = ReminderClock::new(ClockConfig::default());
//! // In a loop:
//! let ctx = TickContext { now, reminders: &reminders, snapshot: Some(&snapshot) };
//! for event in clock.tick(&ctx, &notifier) { /* surface to the user */ }
//! ```

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::alarm::{AlarmPhase, Occurrence};
use super::rule::Reminder;
use crate::adherence::DailySnapshot;
use crate::events::Event;
use crate::notify::Notify;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes until the reminder's next due time, wrapping forward across
/// midnight. Always in `[0, 1439]`; equals 0 exactly once per 24-hour
/// cycle per reminder.
pub fn minutes_until(reminder_min: u32, current_min: u32) -> u32 {
    (reminder_min as i32 - current_min as i32).rem_euclid(MINUTES_PER_DAY as i32) as u32
}

/// Clock tuning knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Lead time before the due minute during which a countdown is shown.
    pub warning_window_min: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            warning_window_min: 10,
        }
    }
}

/// Inputs for one tick, rebuilt by the caller at tick start.
///
/// `snapshot` is `None` when the ledger read failed; the clock then treats
/// every activity as unsatisfied so a due alarm still fires.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Current local wall-clock time.
    pub now: NaiveDateTime,
    pub reminders: &'a [Reminder],
    pub snapshot: Option<&'a DailySnapshot>,
}

/// Cooperative reminder scheduler and alarm state machine.
///
/// Single-writer: ticks are strictly sequential, and occurrence state is
/// only read between ticks. Serializable so a CLI can persist it between
/// invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderClock {
    config: ClockConfig,
    /// The local calendar day the occurrence map belongs to.
    day: Option<NaiveDate>,
    /// Occurrence per reminder for the current day.
    occurrences: HashMap<i64, Occurrence>,
}

impl ReminderClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            day: None,
            occurrences: HashMap::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> ClockConfig {
        self.config
    }

    /// Replace the tuning. Callers that persist the clock between ticks
    /// apply the configuration on disk after deserializing, so an edited
    /// warning window takes effect on the next tick.
    pub fn set_config(&mut self, config: ClockConfig) {
        self.config = config;
    }

    /// Phase of a reminder for the current day. Absent occurrences are
    /// `Scheduled` by definition.
    pub fn phase(&self, reminder_id: i64) -> AlarmPhase {
        self.occurrences
            .get(&reminder_id)
            .map(|o| o.phase)
            .unwrap_or(AlarmPhase::Scheduled)
    }

    pub fn occurrence(&self, reminder_id: i64) -> Option<&Occurrence> {
        self.occurrences.get(&reminder_id)
    }

    /// Occurrences currently ringing, for the presentation layer's modal.
    pub fn ringing(&self) -> Vec<&Occurrence> {
        let mut out: Vec<&Occurrence> = self
            .occurrences
            .values()
            .filter(|o| o.phase == AlarmPhase::Ringing)
            .collect();
        out.sort_by_key(|o| o.reminder_id);
        out
    }

    /// Visible countdowns, sorted by time remaining.
    pub fn countdowns(&self) -> Vec<&Occurrence> {
        let mut out: Vec<&Occurrence> = self
            .occurrences
            .values()
            .filter(|o| o.phase == AlarmPhase::Imminent)
            .collect();
        out.sort_by_key(|o| o.minutes_until);
        out
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Call periodically. Evaluates every reminder against the context and
    /// returns the state changes of this tick. Event timestamps derive from
    /// `ctx.now`, so a tick is reproducible for a given context.
    ///
    /// A failure on one reminder never aborts the rest: malformed rules are
    /// skipped with a warning and re-examined next tick.
    pub fn tick(&mut self, ctx: &TickContext<'_>, notify: &dyn Notify) -> Vec<Event> {
        let mut events = Vec::new();
        let today = ctx.now.date();
        let now = ctx.now.and_utc();
        self.roll_day(today, now, &mut events);

        let weekday = today.weekday();
        let current_min = ctx.now.hour() * 60 + ctx.now.minute();

        for reminder in ctx.reminders {
            if !reminder.is_active {
                // Inactive reminders never leave Scheduled.
                continue;
            }
            if !reminder.time_of_day.is_valid() {
                tracing::warn!(
                    reminder_id = reminder.id,
                    time_of_day = %reminder.time_of_day,
                    "skipping reminder with invalid time of day"
                );
                continue;
            }
            if !reminder.days_of_week.includes(weekday) {
                continue;
            }

            let remaining = minutes_until(reminder.time_of_day.minute_of_day(), current_min);
            self.evaluate(reminder, remaining, now, ctx.snapshot, notify, &mut events);
        }

        events
    }

    /// Explicit user dismissal of a ringing alarm. Returns the event when
    /// the occurrence was actually ringing.
    pub fn acknowledge(&mut self, reminder_id: i64) -> Option<Event> {
        let now = Utc::now();
        let occ = self.occurrences.get_mut(&reminder_id)?;
        if occ.acknowledge(now) {
            Some(Event::AlarmAcknowledged {
                reminder_id,
                at: now,
            })
        } else {
            None
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn roll_day(&mut self, today: NaiveDate, now: DateTime<Utc>, events: &mut Vec<Event>) {
        match self.day {
            Some(day) if day == today => {}
            Some(_) => {
                // Every reminder re-enters Scheduled for the new day.
                self.occurrences.clear();
                self.day = Some(today);
                events.push(Event::DayRolledOver {
                    day: today,
                    at: now,
                });
            }
            None => self.day = Some(today),
        }
    }

    fn evaluate(
        &mut self,
        reminder: &Reminder,
        remaining: u32,
        now: DateTime<Utc>,
        snapshot: Option<&DailySnapshot>,
        notify: &dyn Notify,
        events: &mut Vec<Event>,
    ) {
        let day = self.day.unwrap_or_default();
        let occ = self.occurrences.entry(reminder.id).or_insert_with(|| {
            Occurrence::new(
                reminder.id,
                day,
                reminder.activity_kind,
                reminder.message_text(),
            )
        });

        if occ.is_resolved() {
            return;
        }

        if remaining == 0 {
            if occ.due_evaluated {
                return;
            }
            occ.due_evaluated = true;
            // A missing snapshot counts as unsatisfied: fail toward alerting.
            let satisfied = snapshot
                .map(|s| reminder.activity_kind.is_satisfied_by(s))
                .unwrap_or(false);
            if satisfied {
                if occ.suppress() {
                    events.push(Event::AlarmSuppressed {
                        reminder_id: reminder.id,
                        kind: reminder.activity_kind,
                        at: now,
                    });
                }
            } else if occ.trigger(now) {
                notify.notify(occ);
                events.push(Event::AlarmTriggered {
                    reminder_id: reminder.id,
                    kind: reminder.activity_kind,
                    message: occ.message.clone(),
                    at: now,
                });
            }
        } else if remaining <= self.config.warning_window_min {
            if occ.enter_imminent(remaining) {
                events.push(Event::CountdownUpdated {
                    reminder_id: reminder.id,
                    kind: reminder.activity_kind,
                    minutes_until: remaining,
                    at: now,
                });
            }
        } else if occ.revert_to_scheduled() {
            events.push(Event::CountdownCleared {
                reminder_id: reminder.id,
                at: now,
            });
        }
    }
}
