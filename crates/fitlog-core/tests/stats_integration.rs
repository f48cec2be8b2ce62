//! Stats computed over database-backed history.

use chrono::NaiveDate;
use fitlog_core::{compute_streak, weekly_aggregate, DailyLog, Database};

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn add_run(db: &Database, date: &str, calories: u32, minutes: u32) {
    db.add_workout("cardio", "Run", minutes, calories, "medium", d(date), None)
        .unwrap();
}

#[test]
fn streak_over_stored_workouts() {
    let db = Database::open_memory().unwrap();
    add_run(&db, "2026-08-26", 300, 30);
    add_run(&db, "2026-08-27", 250, 25);
    add_run(&db, "2026-08-27", 150, 15); // second workout same day
    add_run(&db, "2026-08-28", 400, 40);
    add_run(&db, "2026-08-20", 500, 50); // broken off by the 21st..25th gap

    let dates = db.distinct_workout_dates().unwrap();
    assert_eq!(compute_streak(&dates, d("2026-08-28")), 3);
}

#[test]
fn weekly_totals_over_stored_workouts() {
    let db = Database::open_memory().unwrap();
    let today = d("2026-08-28");
    add_run(&db, "2026-08-28", 300, 30);
    add_run(&db, "2026-08-21", 200, 20); // seventh day back, included
    add_run(&db, "2026-08-20", 999, 99); // eighth day back, excluded

    let entries = db
        .workouts_on_or_after(today - chrono::Duration::days(7))
        .unwrap();
    let agg = weekly_aggregate(&entries, today);
    assert_eq!(agg.workouts, 2);
    assert_eq!(agg.total_calories, 500);
    assert_eq!(agg.total_minutes, 50);
}

#[test]
fn summary_ties_the_pieces_together() {
    let db = Database::open_memory().unwrap();
    let today = d("2026-08-28");
    add_run(&db, "2026-08-28", 300, 30);
    add_run(&db, "2026-08-27", 250, 25);

    let mut log = DailyLog::empty(today);
    log.weight_kg = Some(80.5);
    log.water_ml = Some(1200);
    db.upsert_daily_log(&log).unwrap();

    let mut old = DailyLog::empty(d("2026-08-16"));
    old.weight_kg = Some(83.5);
    db.upsert_daily_log(&old).unwrap();

    db.add_goal("weight_loss", 75.0, 80.5, None).unwrap();

    let summary = db.stats_summary_for(today).unwrap();
    assert_eq!(summary.workout_streak, 2);
    assert_eq!(summary.this_week.workouts, 2);
    assert_eq!(summary.active_goals, 1);
    assert_eq!(summary.weight_progress.recent_avg, Some(80.5));
    assert_eq!(summary.weight_progress.previous_avg, Some(83.5));
    assert_eq!(summary.today.unwrap().water_ml, Some(1200));
}
