mod alarm;
mod clock;
mod rule;

pub use alarm::{AlarmPhase, Occurrence};
pub use clock::{minutes_until, ClockConfig, ReminderClock, TickContext};
pub use rule::{DaysOfWeek, Reminder, TimeOfDay};
