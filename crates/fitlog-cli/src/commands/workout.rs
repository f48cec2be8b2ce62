use chrono::{Local, NaiveDate};
use clap::Subcommand;
use fitlog_core::Database;

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Record a workout
    Add {
        /// Workout category (e.g. "cardio", "strength", "yoga")
        #[arg(long = "type", value_name = "TYPE")]
        workout_type: String,
        /// Workout name
        #[arg(long)]
        name: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Calories burned
        #[arg(long)]
        calories: u32,
        /// Intensity: low, medium or high
        #[arg(long, default_value = "medium")]
        intensity: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List recent workouts
    List,
    /// Delete a workout by id
    Delete { id: i64 },
}

pub fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        WorkoutAction::Add {
            workout_type,
            name,
            duration,
            calories,
            intensity,
            date,
            notes,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let id = db.add_workout(
                &workout_type,
                &name,
                duration,
                calories,
                &intensity,
                date,
                notes.as_deref(),
            )?;
            println!("{}", serde_json::json!({ "id": id }));
        }
        WorkoutAction::List => {
            let workouts = db.list_workouts()?;
            println!("{}", serde_json::to_string_pretty(&workouts)?);
        }
        WorkoutAction::Delete { id } => {
            if db.delete_workout(id)? {
                println!("deleted {id}");
            } else {
                eprintln!("no workout with id {id}");
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
