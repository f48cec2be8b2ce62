//! Reminder rules: what to monitor, when, and on which days.

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::adherence::ActivityKind;
use crate::error::ValidationError;

/// Wall-clock time of day. No date, no time zone.
///
/// Fields are public for serde round-trips through storage, so validity is
/// re-checked at the point of use ([`TimeOfDay::is_valid`]); the clock skips
/// reminders carrying an out-of-range time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ValidationError> {
        let t = Self {
            hour,
            minute,
            second,
        };
        if t.is_valid() {
            Ok(t)
        } else {
            Err(ValidationError::InvalidValue {
                field: "time_of_day".into(),
                message: format!("{hour:02}:{minute:02}:{second:02} is not a valid clock time"),
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60 && self.second < 60
    }

    /// Minute index within the day: `hour * 60 + minute`, 0..1440.
    pub fn minute_of_day(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Parses `"HH:MM"` or `"HH:MM:SS"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidValue {
            field: "time_of_day".into(),
            message: format!("'{s}' is not in HH:MM or HH:MM:SS form"),
        };
        let mut parts = s.trim().split(':');
        let hour = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let minute = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let second = match parts.next() {
            Some(p) => p.parse().map_err(|_| invalid())?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        TimeOfDay::new(hour, minute, second)
    }
}

/// The weekdays a reminder applies to, as a bitmask (bit 0 = Monday).
///
/// Serializes as its storage text form: `"all"` or a comma list like
/// `"mon,wed,fri"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaysOfWeek(u8);

const ALL_DAYS: u8 = 0b0111_1111;

impl DaysOfWeek {
    pub const ALL: DaysOfWeek = DaysOfWeek(ALL_DAYS);

    pub fn includes(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    fn day_name(index: u8) -> &'static str {
        match index {
            0 => "mon",
            1 => "tue",
            2 => "wed",
            3 => "thu",
            4 => "fri",
            5 => "sat",
            _ => "sun",
        }
    }

    fn day_bit(name: &str) -> Option<u8> {
        let bit = match name {
            "mon" | "monday" => 0,
            "tue" | "tues" | "tuesday" => 1,
            "wed" | "wednesday" => 2,
            "thu" | "thur" | "thurs" | "thursday" => 3,
            "fri" | "friday" => 4,
            "sat" | "saturday" => 5,
            "sun" | "sunday" => 6,
            _ => return None,
        };
        Some(1 << bit)
    }
}

impl Default for DaysOfWeek {
    fn default() -> Self {
        DaysOfWeek::ALL
    }
}

impl fmt::Display for DaysOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 & ALL_DAYS == ALL_DAYS {
            return f.write_str("all");
        }
        let names: Vec<&str> = (0..7)
            .filter(|i| self.0 & (1 << i) != 0)
            .map(Self::day_name)
            .collect();
        f.write_str(&names.join(","))
    }
}

impl FromStr for DaysOfWeek {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(DaysOfWeek::ALL);
        }
        let mut mask = 0u8;
        for part in s.split(',') {
            let bit = Self::day_bit(&part.trim().to_ascii_lowercase()).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "days_of_week".into(),
                    message: format!("'{part}' is not a weekday name"),
                }
            })?;
            mask |= bit;
        }
        Ok(DaysOfWeek(mask))
    }
}

impl Serialize for DaysOfWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DaysOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A user-configured rule specifying when and for which activity an alarm
/// should fire. Created, edited and deleted by the user; never expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub activity_kind: ActivityKind,
    pub time_of_day: TimeOfDay,
    /// Free text shown when the alarm fires. Falls back to a kind-derived
    /// phrase when absent.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub days_of_week: DaysOfWeek,
    pub is_active: bool,
}

impl Reminder {
    /// The message to display, defaulting per activity kind.
    pub fn message_text(&self) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.activity_kind.default_message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_parses_both_forms() {
        let t: TimeOfDay = "07:00".parse().unwrap();
        assert_eq!((t.hour, t.minute, t.second), (7, 0, 0));
        let t: TimeOfDay = "23:59:59".parse().unwrap();
        assert_eq!((t.hour, t.minute, t.second), (23, 59, 59));
    }

    #[test]
    fn time_of_day_rejects_out_of_range() {
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("seven".parse::<TimeOfDay>().is_err());
        assert!("07:00:00:00".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn minute_of_day_range() {
        assert_eq!("00:00".parse::<TimeOfDay>().unwrap().minute_of_day(), 0);
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap().minute_of_day(), 1439);
    }

    #[test]
    fn days_of_week_roundtrip() {
        let days: DaysOfWeek = "mon,wed,fri".parse().unwrap();
        assert!(days.includes(Weekday::Mon));
        assert!(days.includes(Weekday::Wed));
        assert!(!days.includes(Weekday::Tue));
        assert_eq!(days.to_string(), "mon,wed,fri");

        let all: DaysOfWeek = "all".parse().unwrap();
        assert!(all.includes(Weekday::Sun));
        assert_eq!(all.to_string(), "all");
    }

    #[test]
    fn days_of_week_accepts_long_names() {
        let days: DaysOfWeek = "Monday,SUNDAY".parse().unwrap();
        assert!(days.includes(Weekday::Mon));
        assert!(days.includes(Weekday::Sun));
        assert!(!days.includes(Weekday::Sat));
    }

    #[test]
    fn days_of_week_rejects_garbage() {
        assert!("mon,funday".parse::<DaysOfWeek>().is_err());
    }

    #[test]
    fn seven_explicit_days_collapse_to_all() {
        let days: DaysOfWeek = "mon,tue,wed,thu,fri,sat,sun".parse().unwrap();
        assert_eq!(days.to_string(), "all");
    }

    #[test]
    fn message_falls_back_to_kind_phrase() {
        let mut r = Reminder {
            id: 1,
            activity_kind: ActivityKind::Water,
            time_of_day: TimeOfDay::new(7, 0, 0).unwrap(),
            message: None,
            days_of_week: DaysOfWeek::ALL,
            is_active: true,
        };
        assert_eq!(r.message_text(), "Time to drink some water");
        r.message = Some("Hydrate!".into());
        assert_eq!(r.message_text(), "Hydrate!");
        r.message = Some("   ".into());
        assert_eq!(r.message_text(), "Time to drink some water");
    }
}
