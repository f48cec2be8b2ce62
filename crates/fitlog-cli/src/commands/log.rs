use chrono::{Local, NaiveDate};
use clap::Subcommand;
use fitlog_core::{DailyLog, Database};

#[derive(Subcommand)]
pub enum LogAction {
    /// Show the log for a day (created empty for today if absent)
    Show {
        /// Date (YYYY-MM-DD, defaults to today)
        date: Option<NaiveDate>,
    },
    /// Update fields of a day's log
    Set {
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Body weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// Step count
        #[arg(long)]
        steps: Option<u32>,
        /// Water intake in ml
        #[arg(long)]
        water: Option<u32>,
        /// Sleep in hours
        #[arg(long)]
        sleep: Option<f64>,
        /// Mood
        #[arg(long)]
        mood: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Add water to today's total
    Water {
        /// Amount in ml
        ml: u32,
    },
    /// List recent daily logs
    List,
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        LogAction::Show { date } => {
            let log = match date {
                Some(d) => db
                    .get_daily_log(d)?
                    .unwrap_or_else(|| DailyLog::empty(d)),
                None => db.today_log()?,
            };
            println!("{}", serde_json::to_string_pretty(&log)?);
        }
        LogAction::Set {
            date,
            weight,
            steps,
            water,
            sleep,
            mood,
            notes,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let mut log = db
                .get_daily_log(date)?
                .unwrap_or_else(|| DailyLog::empty(date));
            if weight.is_some() {
                log.weight_kg = weight;
            }
            if steps.is_some() {
                log.steps = steps;
            }
            if water.is_some() {
                log.water_ml = water;
            }
            if sleep.is_some() {
                log.sleep_hours = sleep;
            }
            if mood.is_some() {
                log.mood = mood;
            }
            if notes.is_some() {
                log.notes = notes;
            }
            db.upsert_daily_log(&log)?;
            println!("{}", serde_json::to_string_pretty(&log)?);
        }
        LogAction::Water { ml } => {
            let mut log = db.today_log()?;
            log.water_ml = Some(log.water_ml.unwrap_or(0) + ml);
            db.upsert_daily_log(&log)?;
            println!("{}", serde_json::json!({ "water_ml": log.water_ml }));
        }
        LogAction::List => {
            let logs = db.list_daily_logs()?;
            println!("{}", serde_json::to_string_pretty(&logs)?);
        }
    }
    Ok(())
}
