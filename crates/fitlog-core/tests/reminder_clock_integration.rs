//! End-to-end reminder flow: rules and activity come from the database,
//! the clock runs against the stored snapshot, and acknowledgment keeps
//! the alarm quiet for the rest of the day.

use chrono::NaiveDateTime;
use fitlog_core::{
    ActivityKind, AlarmPhase, ClockConfig, Database, Event, Notify, Occurrence, ReminderClock,
    TickContext,
};
use std::cell::RefCell;

struct Recorder {
    messages: RefCell<Vec<String>>,
}

impl Notify for Recorder {
    fn notify(&self, occurrence: &Occurrence) {
        self.messages.borrow_mut().push(occurrence.message.clone());
    }
}

fn at(date: &str, time: &str) -> NaiveDateTime {
    format!("{date}T{time}").parse().unwrap()
}

#[test]
fn water_reminder_full_day() {
    let db = Database::open_memory().unwrap();
    db.add_reminder(
        ActivityKind::Water,
        "07:00".parse().unwrap(),
        Some("Hydrate!"),
        "all".parse().unwrap(),
    )
    .unwrap();

    let mut clock = ReminderClock::new(ClockConfig::default());
    let notify = Recorder {
        messages: RefCell::new(Vec::new()),
    };
    let reminders = db.list_active_reminders().unwrap();
    let id = reminders[0].id;

    // 06:52, eight minutes out: countdown appears.
    let snapshot = db.snapshot_for("2026-08-28".parse().unwrap()).unwrap();
    let ctx = TickContext {
        now: at("2026-08-28", "06:52:00"),
        reminders: &reminders,
        snapshot: Some(&snapshot),
    };
    let events = clock.tick(&ctx, &notify);
    assert!(matches!(
        events.as_slice(),
        [Event::CountdownUpdated { minutes_until: 8, .. }]
    ));

    // 07:00 with no water logged: the alarm rings with the custom message.
    let ctx = TickContext {
        now: at("2026-08-28", "07:00:00"),
        reminders: &reminders,
        snapshot: Some(&snapshot),
    };
    let events = clock.tick(&ctx, &notify);
    assert!(matches!(events.as_slice(), [Event::AlarmTriggered { .. }]));
    assert_eq!(notify.messages.borrow().as_slice(), ["Hydrate!"]);
    assert_eq!(clock.ringing().len(), 1);

    // User dismisses at 07:05; later ticks stay quiet.
    assert!(clock.acknowledge(id).is_some());
    let ctx = TickContext {
        now: at("2026-08-28", "07:05:00"),
        reminders: &reminders,
        snapshot: Some(&snapshot),
    };
    assert!(clock.tick(&ctx, &notify).is_empty());
    assert_eq!(clock.phase(id), AlarmPhase::Acknowledged);

    // Next morning the occurrence is fresh and rings again.
    let snapshot = db.snapshot_for("2026-08-29".parse().unwrap()).unwrap();
    let ctx = TickContext {
        now: at("2026-08-29", "07:00:00"),
        reminders: &reminders,
        snapshot: Some(&snapshot),
    };
    let events = clock.tick(&ctx, &notify);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::AlarmTriggered { .. })));
    assert_eq!(notify.messages.borrow().len(), 2);
}

#[test]
fn logged_activity_suppresses_the_alarm() {
    let db = Database::open_memory().unwrap();
    db.add_reminder(
        ActivityKind::Workout,
        "18:00".parse().unwrap(),
        None,
        "all".parse().unwrap(),
    )
    .unwrap();
    db.add_workout(
        "cardio",
        "Morning Run",
        30,
        300,
        "medium",
        "2026-08-28".parse().unwrap(),
        None,
    )
    .unwrap();

    let mut clock = ReminderClock::new(ClockConfig::default());
    let notify = Recorder {
        messages: RefCell::new(Vec::new()),
    };
    let reminders = db.list_active_reminders().unwrap();
    let snapshot = db.snapshot_for("2026-08-28".parse().unwrap()).unwrap();

    let ctx = TickContext {
        now: at("2026-08-28", "18:00:00"),
        reminders: &reminders,
        snapshot: Some(&snapshot),
    };
    let events = clock.tick(&ctx, &notify);
    assert!(matches!(events.as_slice(), [Event::AlarmSuppressed { .. }]));
    assert!(notify.messages.borrow().is_empty());
}

#[test]
fn clock_state_survives_serialization() {
    // The CLI persists the clock between invocations; a ringing alarm must
    // still be acknowledgeable after a round-trip.
    let db = Database::open_memory().unwrap();
    db.add_reminder(
        ActivityKind::Weight,
        "07:00".parse().unwrap(),
        None,
        "all".parse().unwrap(),
    )
    .unwrap();

    let mut clock = ReminderClock::new(ClockConfig::default());
    let notify = Recorder {
        messages: RefCell::new(Vec::new()),
    };
    let reminders = db.list_active_reminders().unwrap();
    let id = reminders[0].id;

    let ctx = TickContext {
        now: at("2026-08-28", "07:00:00"),
        reminders: &reminders,
        snapshot: None,
    };
    clock.tick(&ctx, &notify);

    let json = serde_json::to_string(&clock).unwrap();
    let mut restored: ReminderClock = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.phase(id), AlarmPhase::Ringing);
    assert!(restored.acknowledge(id).is_some());
}
