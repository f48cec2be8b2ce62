//! Statistics module for fitlog
//!
//! Pure, stateless aggregations over the historical record: the workout
//! streak, rolling weekly totals, the 30-day chart series and the weight
//! trend comparison. Safe to call from any thread; nothing here mutates.

mod aggregate;
mod streak;

pub use aggregate::{
    daily_totals, weekly_aggregate, weight_trend, DailyTotal, WeeklyAggregate, WeightSample,
    WeightTrend, WorkoutEntry,
};
pub use streak::compute_streak;
