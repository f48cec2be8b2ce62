use chrono::{Duration, Local};
use clap::Subcommand;
use fitlog_core::{compute_streak, daily_totals, weekly_aggregate, Database};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Dashboard summary: today, trailing week, goals, weight trend, streak
    Summary,
    /// Trailing-week workout totals
    Week,
    /// Consecutive-day workout streak
    Streak,
    /// Per-day workout totals over the trailing 30 days
    Chart,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let today = Local::now().date_naive();

    match action {
        StatsAction::Summary => {
            let summary = db.stats_summary()?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Week => {
            let entries = db.workouts_on_or_after(today - Duration::days(7))?;
            let agg = weekly_aggregate(&entries, today);
            println!("{}", serde_json::to_string_pretty(&agg)?);
        }
        StatsAction::Streak => {
            let dates = db.distinct_workout_dates()?;
            let streak = compute_streak(&dates, today);
            println!("{}", serde_json::json!({ "workout_streak": streak }));
        }
        StatsAction::Chart => {
            let entries = db.workouts_on_or_after(today - Duration::days(30))?;
            let totals = daily_totals(&entries, today);
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
    }
    Ok(())
}
