//! Consecutive-day workout streak.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Count of consecutive calendar days with at least one workout, ending at
/// the most recent logged day on or before `today`.
///
/// The streak does not require a workout today to remain nonzero - it runs
/// backward from the latest logged day - but a full missing day breaks it.
/// Recomputed from scratch on each call; an empty set yields 0.
pub fn compute_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut day = match dates.range(..=today).next_back() {
        Some(d) => *d,
        None => return 0,
    };
    let mut streak = 1;
    while let Some(prev) = day.pred_opt() {
        if !dates.contains(&prev) {
            break;
        }
        streak += 1;
        day = prev;
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn set(days: &[&str]) -> BTreeSet<NaiveDate> {
        days.iter().map(|s| d(s)).collect()
    }

    #[test]
    fn empty_history_is_zero() {
        assert_eq!(compute_streak(&BTreeSet::new(), d("2026-08-28")), 0);
    }

    #[test]
    fn single_workout_today_is_one() {
        assert_eq!(compute_streak(&set(&["2026-08-28"]), d("2026-08-28")), 1);
    }

    #[test]
    fn three_consecutive_days() {
        let dates = set(&["2026-08-26", "2026-08-27", "2026-08-28"]);
        assert_eq!(compute_streak(&dates, d("2026-08-28")), 3);
    }

    #[test]
    fn gap_breaks_the_streak() {
        // Workout today and the day before yesterday, nothing yesterday.
        let dates = set(&["2026-08-26", "2026-08-28"]);
        assert_eq!(compute_streak(&dates, d("2026-08-28")), 1);
    }

    #[test]
    fn streak_survives_a_rest_day_today() {
        // Latest entry is yesterday; the streak counts back from there.
        let dates = set(&["2026-08-25", "2026-08-26", "2026-08-27"]);
        assert_eq!(compute_streak(&dates, d("2026-08-28")), 3);
    }

    #[test]
    fn future_dates_are_ignored() {
        let dates = set(&["2026-08-27", "2026-08-28", "2026-09-05"]);
        assert_eq!(compute_streak(&dates, d("2026-08-28")), 2);
    }
}
