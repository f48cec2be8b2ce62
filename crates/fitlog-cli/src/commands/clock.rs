use chrono::Local;
use clap::Subcommand;
use fitlog_core::{
    AlarmPhase, Config, Database, Event, Notify, Occurrence, ReminderClock, TickContext,
};

const CLOCK_KEY: &str = "reminder_clock";

#[derive(Subcommand)]
pub enum ClockAction {
    /// Run the alarm loop in the foreground, printing events as JSON lines
    Run {
        /// Evaluate a single tick and exit
        #[arg(long)]
        once: bool,
    },
    /// Print the clock state as JSON
    Status,
    /// Acknowledge a ringing alarm
    Ack { reminder_id: i64 },
}

/// Rings the terminal bell and prints the alarm message.
struct TerminalNotify {
    enabled: bool,
}

impl Notify for TerminalNotify {
    fn notify(&self, occurrence: &Occurrence) {
        if self.enabled {
            eprint!("\x07");
        }
        eprintln!("[{}] {}", occurrence.kind, occurrence.message);
    }
}

fn load_clock(db: &Database, config: &Config) -> ReminderClock {
    if let Ok(Some(json)) = db.kv_get(CLOCK_KEY) {
        if let Ok(mut clock) = serde_json::from_str::<ReminderClock>(&json) {
            // The persisted copy carries the tuning it was saved with; the
            // configuration on disk wins.
            clock.set_config(config.clock_config());
            return clock;
        }
    }
    ReminderClock::new(config.clock_config())
}

fn save_clock(db: &Database, clock: &ReminderClock) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(clock)?;
    db.kv_set(CLOCK_KEY, &json)?;
    Ok(())
}

/// Acknowledge through the kv store. A `clock run` tick in another process
/// can overwrite the save between our load and store; re-read after saving
/// and retry until the acknowledgment sticks.
fn acknowledge_persisted(
    db: &Database,
    config: &Config,
    reminder_id: i64,
) -> Result<Option<Event>, Box<dyn std::error::Error>> {
    for _ in 0..3 {
        let mut clock = load_clock(db, config);
        let Some(event) = clock.acknowledge(reminder_id) else {
            return Ok(None);
        };
        save_clock(db, &clock)?;
        let check = load_clock(db, config);
        if check.phase(reminder_id) == AlarmPhase::Acknowledged {
            return Ok(Some(event));
        }
    }
    Err(format!("acknowledgment of reminder {reminder_id} kept being overwritten").into())
}

fn tick_once(db: &Database, config: &Config) -> Result<Vec<Event>, Box<dyn std::error::Error>> {
    // Reload state each tick so edits and acks from other processes are
    // picked up between beats.
    let mut clock = load_clock(db, config);
    let reminders = db.list_active_reminders()?;
    let snapshot = match db.today_snapshot() {
        Ok(s) => Some(s),
        Err(e) => {
            // No snapshot means every reminder is treated as unsatisfied,
            // so a read failure still alerts.
            tracing::warn!(error = %e, "could not read today's activity snapshot");
            None
        }
    };
    let ctx = TickContext {
        now: Local::now().naive_local(),
        reminders: &reminders,
        snapshot: snapshot.as_ref(),
    };
    let notify = TerminalNotify {
        enabled: config.notifications.enabled,
    };
    let events = clock.tick(&ctx, &notify);
    save_clock(db, &clock)?;
    Ok(events)
}

pub fn run(action: ClockAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;

    match action {
        ClockAction::Run { once } => {
            let period = std::time::Duration::from_secs(u64::from(
                config.clock.tick_period_secs.max(1),
            ));
            loop {
                for event in tick_once(&db, &config)? {
                    println!("{}", serde_json::to_string(&event)?);
                }
                if once {
                    break;
                }
                std::thread::sleep(period);
            }
        }
        ClockAction::Status => {
            let clock = load_clock(&db, &config);
            println!("{}", serde_json::to_string_pretty(&clock)?);
        }
        ClockAction::Ack { reminder_id } => {
            match acknowledge_persisted(&db, &config, reminder_id)? {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => {
                    eprintln!("reminder {reminder_id} is not ringing");
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlog_core::{ActivityKind, ClockConfig, DaysOfWeek, LogNotify, Reminder};

    fn ring(db: &Database) -> i64 {
        let reminder = Reminder {
            id: 1,
            activity_kind: ActivityKind::Water,
            time_of_day: "07:00".parse().unwrap(),
            message: None,
            days_of_week: DaysOfWeek::ALL,
            is_active: true,
        };
        let mut clock = ReminderClock::new(ClockConfig::default());
        let ctx = TickContext {
            now: "2026-08-28T07:00:00".parse().unwrap(),
            reminders: std::slice::from_ref(&reminder),
            snapshot: None,
        };
        clock.tick(&ctx, &LogNotify);
        save_clock(db, &clock).unwrap();
        reminder.id
    }

    #[test]
    fn reloaded_clock_takes_the_current_config() {
        let db = Database::open_memory().unwrap();
        let clock = ReminderClock::new(ClockConfig {
            warning_window_min: 10,
        });
        save_clock(&db, &clock).unwrap();

        let mut config = Config::default();
        config.clock.warning_window_min = 25;
        let restored = load_clock(&db, &config);
        assert_eq!(restored.config().warning_window_min, 25);
    }

    #[test]
    fn acknowledgment_persists_through_the_kv_store() {
        let db = Database::open_memory().unwrap();
        let config = Config::default();
        let id = ring(&db);

        let event = acknowledge_persisted(&db, &config, id).unwrap();
        assert!(event.is_some());
        assert_eq!(load_clock(&db, &config).phase(id), AlarmPhase::Acknowledged);

        // Not ringing any more: a second ack reports nothing to do.
        assert!(acknowledge_persisted(&db, &config, id).unwrap().is_none());
    }
}
