//! Rolling workout and weight aggregations.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One workout as seen by the aggregations: date, calories, minutes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub date: NaiveDate,
    pub calories: u32,
    pub duration_minutes: u32,
}

/// Totals over the trailing week (today − 7 ..= today).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAggregate {
    pub workouts: u32,
    pub total_calories: u64,
    pub total_minutes: u64,
}

/// Per-day totals for the trailing-30-day chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_calories: u64,
    pub total_minutes: u64,
    pub workout_count: u32,
}

/// One recorded body weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightSample {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

/// Trailing 7-day average weight against the preceding 7-day window.
/// A window with no samples averages to `None`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeightTrend {
    pub recent_avg: Option<f64>,
    pub previous_avg: Option<f64>,
}

/// Sum calories, minutes and count over workouts dated within the last
/// seven days, inclusive on both ends; the 8th day back is excluded.
pub fn weekly_aggregate(entries: &[WorkoutEntry], today: NaiveDate) -> WeeklyAggregate {
    let cutoff = today - Duration::days(7);
    let mut agg = WeeklyAggregate::default();
    for e in entries {
        if e.date >= cutoff && e.date <= today {
            agg.workouts += 1;
            agg.total_calories += u64::from(e.calories);
            agg.total_minutes += u64::from(e.duration_minutes);
        }
    }
    agg
}

/// Group workouts of the trailing 30 days by date, ascending.
pub fn daily_totals(entries: &[WorkoutEntry], today: NaiveDate) -> Vec<DailyTotal> {
    let cutoff = today - Duration::days(30);
    let mut by_date: BTreeMap<NaiveDate, DailyTotal> = BTreeMap::new();
    for e in entries {
        if e.date < cutoff || e.date > today {
            continue;
        }
        let total = by_date.entry(e.date).or_insert(DailyTotal {
            date: e.date,
            total_calories: 0,
            total_minutes: 0,
            workout_count: 0,
        });
        total.total_calories += u64::from(e.calories);
        total.total_minutes += u64::from(e.duration_minutes);
        total.workout_count += 1;
    }
    by_date.into_values().collect()
}

/// Average weight over the trailing 7 days versus the 7 days before that.
pub fn weight_trend(samples: &[WeightSample], today: NaiveDate) -> WeightTrend {
    let recent_cutoff = today - Duration::days(7);
    let previous_cutoff = today - Duration::days(14);

    let mut recent = (0.0, 0u32);
    let mut previous = (0.0, 0u32);
    for s in samples {
        if s.date > today {
            continue;
        }
        if s.date >= recent_cutoff {
            recent.0 += s.weight_kg;
            recent.1 += 1;
        } else if s.date >= previous_cutoff {
            previous.0 += s.weight_kg;
            previous.1 += 1;
        }
    }

    let avg = |(sum, n): (f64, u32)| if n == 0 { None } else { Some(sum / f64::from(n)) };
    WeightTrend {
        recent_avg: avg(recent),
        previous_avg: avg(previous),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn entry(date: &str, calories: u32, minutes: u32) -> WorkoutEntry {
        WorkoutEntry {
            date: d(date),
            calories,
            duration_minutes: minutes,
        }
    }

    #[test]
    fn weekly_window_is_inclusive_and_excludes_eighth_day() {
        let today = d("2026-08-28");
        let entries = [
            entry("2026-08-28", 300, 30), // today
            entry("2026-08-21", 200, 20), // exactly 7 days back: included
            entry("2026-08-20", 500, 50), // 8th day back: excluded
        ];
        let agg = weekly_aggregate(&entries, today);
        assert_eq!(agg.workouts, 2);
        assert_eq!(agg.total_calories, 500);
        assert_eq!(agg.total_minutes, 50);
    }

    #[test]
    fn weekly_aggregate_of_nothing_is_zero() {
        assert_eq!(
            weekly_aggregate(&[], d("2026-08-28")),
            WeeklyAggregate::default()
        );
    }

    #[test]
    fn daily_totals_group_and_sort() {
        let today = d("2026-08-28");
        let entries = [
            entry("2026-08-28", 300, 30),
            entry("2026-08-28", 100, 10),
            entry("2026-08-27", 250, 25),
            entry("2026-07-01", 999, 99), // beyond 30 days
        ];
        let totals = daily_totals(&entries, today);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].date, d("2026-08-27"));
        assert_eq!(totals[1].workout_count, 2);
        assert_eq!(totals[1].total_calories, 400);
    }

    #[test]
    fn weight_trend_splits_windows() {
        let today = d("2026-08-28");
        let samples = [
            WeightSample {
                date: d("2026-08-27"),
                weight_kg: 80.0,
            },
            WeightSample {
                date: d("2026-08-25"),
                weight_kg: 82.0,
            },
            WeightSample {
                date: d("2026-08-16"),
                weight_kg: 84.0,
            },
        ];
        let trend = weight_trend(&samples, today);
        assert_eq!(trend.recent_avg, Some(81.0));
        assert_eq!(trend.previous_avg, Some(84.0));
    }

    #[test]
    fn empty_window_averages_to_none() {
        let trend = weight_trend(&[], d("2026-08-28"));
        assert!(trend.recent_avg.is_none());
        assert!(trend.previous_avg.is_none());
    }
}
