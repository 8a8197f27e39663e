//! Inclusive calendar ranges covering a trip.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive start and end dates of a trip.
///
/// Only calendar dates are compared, so time zones and daylight saving
/// cannot shift the day count.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use itinera_core::DateRange;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
/// );
/// assert_eq!(range.day_count()?, 3);
/// # Ok::<(), itinera_core::DateRangeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Last day of the trip (inclusive).
    pub end_date: NaiveDate,
}

/// Longest trip, in days, a range may describe.
pub const MAX_TRIP_DAYS: u32 = 366;

/// Errors raised for unusable date ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    /// The end date precedes the start date.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
    /// The range holds more than [`MAX_TRIP_DAYS`] days.
    #[error("date range from {start} to {end} is longer than {max} days", max = MAX_TRIP_DAYS)]
    TooLong {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

impl DateRange {
    /// Pair a start and end date. No ordering check is made here.
    #[must_use]
    pub const fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Number of days in the range, counting both ends.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::EndBeforeStart`] when the range is inverted
    /// and [`DateRangeError::TooLong`] past [`MAX_TRIP_DAYS`].
    pub fn day_count(&self) -> Result<u32, DateRangeError> {
        let span = self.end_date.signed_duration_since(self.start_date).num_days();
        if span < 0 {
            return Err(DateRangeError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        span.checked_add(1)
            .and_then(|count| u32::try_from(count).ok())
            .filter(|count| *count <= MAX_TRIP_DAYS)
            .ok_or(DateRangeError::TooLong {
                start: self.start_date,
                end: self.end_date,
            })
    }

    /// Calendar date of the given 1-based day number, if it lies in range.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use itinera_core::DateRange;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
    /// let range = DateRange::new(start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    /// assert_eq!(range.date_of(2), NaiveDate::from_ymd_opt(2024, 2, 29));
    /// assert_eq!(range.date_of(4), None);
    /// ```
    #[must_use]
    pub fn date_of(&self, day_number: u32) -> Option<NaiveDate> {
        let offset = day_number.checked_sub(1)?;
        let date = self
            .start_date
            .checked_add_days(Days::new(u64::from(offset)))?;
        (date <= self.end_date).then_some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[rstest]
    #[case(date(2024, 6, 10), date(2024, 6, 12), 3)]
    #[case(date(2024, 6, 10), date(2024, 6, 10), 1)]
    #[case(date(2024, 3, 30), date(2024, 4, 2), 4)]
    #[case(date(2023, 12, 31), date(2024, 1, 1), 2)]
    fn counts_days_inclusively(#[case] start: NaiveDate, #[case] end: NaiveDate, #[case] n: u32) {
        assert_eq!(DateRange::new(start, end).day_count(), Ok(n));
    }

    #[rstest]
    fn rejects_inverted_range() {
        let range = DateRange::new(date(2024, 6, 12), date(2024, 6, 10));
        assert!(matches!(
            range.day_count(),
            Err(DateRangeError::EndBeforeStart { .. })
        ));
    }

    #[rstest]
    #[case(date(2024, 1, 1), date(2024, 12, 31), Ok(366))]
    #[case(date(2023, 1, 1), date(2024, 1, 1), Ok(366))]
    #[case(date(2024, 1, 1), date(2025, 1, 1), Err(()))]
    #[case(NaiveDate::MIN, NaiveDate::MAX, Err(()))]
    fn caps_trip_length(
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
        #[case] expected: Result<u32, ()>,
    ) {
        let counted = DateRange::new(start, end).day_count();
        match expected {
            Ok(n) => assert_eq!(counted, Ok(n)),
            Err(()) => assert!(matches!(counted, Err(DateRangeError::TooLong { .. }))),
        }
    }

    #[rstest]
    fn deserialises_iso_dates() {
        let range: DateRange =
            serde_json::from_str(r#"{"startDate":"2024-06-10","endDate":"2024-06-12"}"#)
                .expect("valid range");
        assert_eq!(range.start_date, date(2024, 6, 10));
        assert_eq!(range.end_date, date(2024, 6, 12));
    }

    #[rstest]
    fn date_of_rejects_day_zero() {
        let range = DateRange::new(date(2024, 6, 10), date(2024, 6, 12));
        assert_eq!(range.date_of(0), None);
        assert_eq!(range.date_of(1), Some(date(2024, 6, 10)));
        assert_eq!(range.date_of(3), Some(date(2024, 6, 12)));
    }
}
