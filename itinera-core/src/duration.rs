//! Average visit durations for points of interest.
//!
//! Attraction catalogues publish how long a typical visit takes as an
//! `"HH:MM:SS"` string. [`VisitDuration`] is the parsed, minute-resolution
//! form used by the capacity checker.
//!
//! Two parsing entry points exist:
//!
//! - [`str::parse`] (via [`FromStr`]) is strict and reports a
//!   [`DurationParseError`].
//! - [`VisitDuration::parse_lenient`] treats missing or malformed input as a
//!   zero-length visit, which is what the capacity checker wants when a
//!   catalogue entry is incomplete.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const MINUTES_PER_HOUR: u32 = 60;
const SECONDS_PER_MINUTE: u32 = 60;

/// Length of a single POI visit, truncated to whole minutes.
///
/// # Examples
/// ```
/// use itinera_core::VisitDuration;
///
/// let duration: VisitDuration = "02:30:00".parse()?;
/// assert_eq!(duration.minutes(), 150);
/// assert_eq!(duration.to_string(), "02:30:00");
/// # Ok::<(), itinera_core::DurationParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VisitDuration {
    minutes: u32,
}

/// Errors returned when parsing a [`VisitDuration`] strictly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    /// The input was empty or whitespace.
    #[error("duration is empty")]
    Empty,
    /// More than three `:`-separated fields were supplied.
    #[error("duration {input:?} has more than three fields")]
    TooManyFields {
        /// The rejected input.
        input: String,
    },
    /// A field was not a non-negative integer.
    #[error("duration field {field:?} is not a whole number")]
    InvalidField {
        /// The offending field.
        field: String,
    },
    /// Minutes or seconds were 60 or more.
    #[error("{component} value {value} is out of range")]
    OutOfRange {
        /// Which component overflowed (`"minutes"` or `"seconds"`).
        component: &'static str,
        /// The rejected value.
        value: u32,
    },
    /// The total number of minutes does not fit in a `u32`.
    #[error("duration {input:?} is too large")]
    Overflow {
        /// The rejected input.
        input: String,
    },
}

impl VisitDuration {
    /// A visit that takes no time.
    pub const ZERO: Self = Self { minutes: 0 };

    /// Construct a duration from whole minutes.
    ///
    /// # Examples
    /// ```
    /// use itinera_core::VisitDuration;
    ///
    /// assert_eq!(VisitDuration::from_minutes(90).minutes(), 90);
    /// ```
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    /// Whole minutes in this duration.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.minutes
    }

    /// Parse a catalogue duration, treating absent or malformed input as zero.
    ///
    /// # Examples
    /// ```
    /// use itinera_core::VisitDuration;
    ///
    /// assert_eq!(VisitDuration::parse_lenient(Some("01:15:00")).minutes(), 75);
    /// assert_eq!(VisitDuration::parse_lenient(Some("soon")), VisitDuration::ZERO);
    /// assert_eq!(VisitDuration::parse_lenient(None), VisitDuration::ZERO);
    /// ```
    #[must_use]
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        let Some(text) = raw else {
            return Self::ZERO;
        };
        text.parse().unwrap_or_else(|err| {
            log::debug!("treating visit duration {text:?} as zero: {err}");
            Self::ZERO
        })
    }
}

fn parse_field(field: &str) -> Result<u32, DurationParseError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationParseError::InvalidField {
            field: field.to_owned(),
        });
    }
    field
        .parse()
        .map_err(|_| DurationParseError::InvalidField {
            field: field.to_owned(),
        })
}

fn bounded(component: &'static str, value: u32) -> Result<u32, DurationParseError> {
    if value >= 60 {
        Err(DurationParseError::OutOfRange { component, value })
    } else {
        Ok(value)
    }
}

impl FromStr for VisitDuration {
    type Err = DurationParseError;

    /// Parse `H`, `H:MM` or `H:MM:SS`. Seconds only contribute whole minutes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(DurationParseError::Empty);
        }
        let fields = input
            .split(':')
            .map(parse_field)
            .collect::<Result<Vec<_>, _>>()?;
        let (hours, minutes, seconds) = match fields.as_slice() {
            [h] => (*h, 0, 0),
            [h, m] => (*h, bounded("minutes", *m)?, 0),
            [h, m, sec] => (*h, bounded("minutes", *m)?, bounded("seconds", *sec)?),
            _ => {
                return Err(DurationParseError::TooManyFields {
                    input: input.to_owned(),
                });
            }
        };
        let total = hours
            .checked_mul(MINUTES_PER_HOUR)
            .and_then(|m| m.checked_add(minutes))
            .and_then(|m| m.checked_add(seconds.div_euclid(SECONDS_PER_MINUTE)))
            .ok_or_else(|| DurationParseError::Overflow {
                input: input.to_owned(),
            })?;
        Ok(Self::from_minutes(total))
    }
}

impl fmt::Display for VisitDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.minutes.div_euclid(MINUTES_PER_HOUR);
        let minutes = self.minutes.rem_euclid(MINUTES_PER_HOUR);
        write!(f, "{hours:02}:{minutes:02}:00")
    }
}
