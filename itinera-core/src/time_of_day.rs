//! Wall-clock bounds of an itinerary day.
//!
//! Times travel as `"HH:MM"` strings. Persisted trips report `"HH:MM:SS"`;
//! the seconds are dropped on the way in.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A minute-resolution time of day.
///
/// # Examples
/// ```
/// use itinera_core::TimeOfDay;
///
/// let start: TimeOfDay = "09:00".parse()?;
/// let end: TimeOfDay = "18:00:00".parse()?;
/// assert_eq!(start.minutes_until(end), 540);
/// assert_eq!(end.to_string(), "18:00");
/// # Ok::<(), itinera_core::TimeOfDayError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

/// Errors returned when parsing a [`TimeOfDay`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("time of day {input:?} is not a valid HH:MM value")]
pub struct TimeOfDayError {
    /// The rejected input.
    pub input: String,
}

impl TimeOfDay {
    /// Default start of an itinerary day (09:00).
    pub const DAY_START: Self = Self::from_hm_const(9, 0);
    /// Default end of an itinerary day (18:00).
    pub const DAY_END: Self = Self::from_hm_const(18, 0);

    const fn from_hm_const(hour: u32, minute: u32) -> Self {
        match NaiveTime::from_hms_opt(hour, minute, 0) {
            Some(time) => Self(time),
            None => Self(NaiveTime::MIN),
        }
    }

    /// Construct a time from hours and minutes, if both are in range.
    ///
    /// # Examples
    /// ```
    /// use itinera_core::TimeOfDay;
    ///
    /// assert!(TimeOfDay::from_hm(23, 59).is_some());
    /// assert!(TimeOfDay::from_hm(24, 0).is_none());
    /// ```
    #[must_use]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Signed minutes from `self` until `end` on the same day.
    ///
    /// Windows that would cross midnight are not supported and produce a
    /// negative value.
    #[must_use]
    pub fn minutes_until(self, end: Self) -> i64 {
        (end.0 - self.0).num_minutes()
    }

    /// Hour component.
    #[must_use]
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    /// Minute component.
    #[must_use]
    pub fn minute(self) -> u32 {
        self.0.minute()
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        NaiveTime::parse_from_str(input, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
            .ok()
            .and_then(|time| time.with_second(0))
            .map(Self)
            .ok_or_else(|| TimeOfDayError {
                input: input.to_owned(),
            })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("09:00", 9, 0)]
    #[case("18:30", 18, 30)]
    #[case("07:15:45", 7, 15)]
    #[case("00:00", 0, 0)]
    fn parses_clock_strings(#[case] input: &str, #[case] hour: u32, #[case] minute: u32) {
        let time: TimeOfDay = input.parse().expect("valid time");
        assert_eq!((time.hour(), time.minute()), (hour, minute));
    }

    #[rstest]
    #[case("")]
    #[case("25:00")]
    #[case("09:60")]
    #[case("nine")]
    fn rejects_invalid_clock_strings(#[case] input: &str) {
        assert!(input.parse::<TimeOfDay>().is_err());
    }

    #[rstest]
    fn default_window_spans_nine_hours() {
        assert_eq!(TimeOfDay::DAY_START.minutes_until(TimeOfDay::DAY_END), 540);
    }

    #[rstest]
    fn inverted_window_is_negative() {
        let start = TimeOfDay::from_hm(18, 0).expect("valid time");
        let end = TimeOfDay::from_hm(9, 0).expect("valid time");
        assert_eq!(start.minutes_until(end), -540);
    }

    #[rstest]
    fn serialises_without_seconds() {
        let time: TimeOfDay = "08:05:59".parse().expect("valid time");
        let json = serde_json::to_string(&time).expect("serialise");
        assert_eq!(json, "\"08:05\"");
        let back: TimeOfDay = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, time);
    }
}
