use clap::Subcommand;
use fitlog_core::{ActivityKind, Database, DaysOfWeek, TimeOfDay};

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Create a reminder
    Add {
        /// Activity kind: weight, water, sleep or workout
        #[arg(long)]
        kind: String,
        /// Time of day (HH:MM or HH:MM:SS)
        #[arg(long)]
        time: TimeOfDay,
        /// Message shown when the alarm fires
        #[arg(long)]
        message: Option<String>,
        /// Weekdays, "all" or a comma list like "mon,wed,fri"
        #[arg(long, default_value = "all")]
        days: DaysOfWeek,
    },
    /// List reminders
    List,
    /// Update a reminder's time, message or active flag
    Update {
        id: i64,
        #[arg(long)]
        time: Option<TimeOfDay>,
        #[arg(long)]
        message: Option<String>,
        /// true to enable, false to disable
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a reminder
    Delete { id: i64 },
}

pub fn run(action: ReminderAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        ReminderAction::Add {
            kind,
            time,
            message,
            days,
        } => {
            let parsed: ActivityKind = kind.parse().unwrap_or(ActivityKind::Unknown);
            if parsed == ActivityKind::Unknown {
                eprintln!("unknown activity kind: {kind} (expected weight, water, sleep or workout)");
                std::process::exit(1);
            }
            let id = db.add_reminder(parsed, time, message.as_deref(), days)?;
            println!("{}", serde_json::json!({ "id": id }));
        }
        ReminderAction::List => {
            let reminders = db.list_reminders()?;
            println!("{}", serde_json::to_string_pretty(&reminders)?);
        }
        ReminderAction::Update {
            id,
            time,
            message,
            active,
        } => {
            if db.update_reminder(id, time, message.as_deref(), active)? {
                println!("updated {id}");
            } else {
                eprintln!("no reminder with id {id}");
                std::process::exit(1);
            }
        }
        ReminderAction::Delete { id } => {
            if db.delete_reminder(id)? {
                println!("deleted {id}");
            } else {
                eprintln!("no reminder with id {id}");
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
