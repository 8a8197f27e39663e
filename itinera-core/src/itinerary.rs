//! Multi-day itineraries and date-driven day generation.
//!
//! [`generate_days`] is the pure regeneration step run whenever the trip
//! dates change; [`clamp_active_day`] is the follow-up bounds check on the
//! editor's active-day pointer. [`Itinerary`] bundles both with the day list
//! so callers cannot forget the second step.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    CapacityExceeded, DateRange, DateRangeError, Day, DayRecord, DayUsage, DurationLookup, PoiId,
    TimeOfDayError, Visit,
};

/// A visit flattened with its day, as the pricing endpoint expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedVisit {
    /// Visited point of interest.
    pub poi_id: PoiId,
    /// Day of the visit.
    pub day_number: u32,
    /// Position within the day.
    pub visit_order: u32,
}

/// Errors raised by itinerary-level edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    /// No day carries the requested number.
    #[error("itinerary has no day {day_number}")]
    UnknownDay {
        /// Requested day number.
        day_number: u32,
    },
    /// A day index was past the end of the list.
    #[error("day index {index} is out of range for {len} days")]
    DayIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of days.
        len: usize,
    },
    /// The only remaining day cannot be removed.
    #[error("an itinerary must keep at least one day")]
    LastDay,
    /// The visit did not fit in the day window.
    #[error(transparent)]
    Capacity(#[from] CapacityExceeded),
}

/// Rebuild the day list for `range`, keeping days whose number survives.
///
/// Days `1..=n` are produced in order. Each reuses the existing day with the
/// same number (window, description and visits intact) or falls back to a
/// default 09:00–18:00 day.
///
/// # Errors
///
/// Returns [`DateRangeError`] when the range is inverted or too long; the
/// caller should keep its previous day list in that case.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use itinera_core::{DateRange, generate_days};
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
/// );
/// let days = generate_days(&[], &range)?;
/// let numbers: Vec<_> = days.iter().map(|d| d.day_number()).collect();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// # Ok::<(), itinera_core::DateRangeError>(())
/// ```
pub fn generate_days(existing: &[Day], range: &DateRange) -> Result<Vec<Day>, DateRangeError> {
    let count = range.day_count()?;
    let days: Vec<Day> = (1..=count)
        .map(|day_number| {
            existing
                .iter()
                .find(|day| day.day_number() == day_number)
                .cloned()
                .unwrap_or_else(|| Day::new(day_number))
        })
        .collect();
    log::debug!(
        "generated {count} days for {} to {} from {} existing",
        range.start_date,
        range.end_date,
        existing.len()
    );
    Ok(days)
}

/// Reset `active` to the first day when it points past `len` days.
///
/// # Examples
/// ```
/// use itinera_core::clamp_active_day;
///
/// assert_eq!(clamp_active_day(2, 3), 2);
/// assert_eq!(clamp_active_day(3, 3), 0);
/// ```
#[must_use]
pub const fn clamp_active_day(active: usize, len: usize) -> usize {
    if active >= len { 0 } else { active }
}

/// An ordered, densely numbered list of days plus the active-day pointer.
///
/// An itinerary always holds at least one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Day>", into = "Vec<Day>")]
pub struct Itinerary {
    days: Vec<Day>,
    active_day: usize,
}

impl Default for Itinerary {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Day>> for Itinerary {
    fn from(days: Vec<Day>) -> Self {
        Self::from_days(days)
    }
}

impl From<Itinerary> for Vec<Day> {
    fn from(itinerary: Itinerary) -> Self {
        itinerary.days
    }
}

impl Itinerary {
    /// An itinerary holding a single default day.
    #[must_use]
    pub fn new() -> Self {
        Self {
            days: vec![Day::new(1)],
            active_day: 0,
        }
    }

    /// Adopt previously stored days, e.g. when editing a saved trip.
    ///
    /// Days are ordered by their stored number and renumbered densely from
    /// 1. An empty list yields a single default day. The active pointer
    /// starts at the first day.
    #[must_use]
    pub fn from_days(mut days: Vec<Day>) -> Self {
        if days.is_empty() {
            return Self::new();
        }
        days.sort_by_key(Day::day_number);
        let mut itinerary = Self {
            days,
            active_day: 0,
        };
        itinerary.renumber();
        itinerary
    }

    /// Load days from their stored wire form.
    ///
    /// Times are truncated to the minute and default to 09:00/18:00 when
    /// absent; visits are ordered by their stored `visitOrder`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeOfDayError`] for a time that is not `HH:MM[:SS]`.
    pub fn from_records(records: Vec<DayRecord>) -> Result<Self, TimeOfDayError> {
        let days = records
            .into_iter()
            .map(Day::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_days(days))
    }

    /// Days in order.
    #[must_use]
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Index of the day being edited.
    #[must_use]
    pub const fn active_day(&self) -> usize {
        self.active_day
    }

    /// Point the editor at another day.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::DayIndexOutOfRange`] for an unknown index.
    pub fn set_active_day(&mut self, index: usize) -> Result<(), ItineraryError> {
        if index >= self.days.len() {
            return Err(ItineraryError::DayIndexOutOfRange {
                index,
                len: self.days.len(),
            });
        }
        self.active_day = index;
        Ok(())
    }

    /// Look up a day by its number.
    #[must_use]
    pub fn day(&self, day_number: u32) -> Option<&Day> {
        self.days.iter().find(|day| day.day_number() == day_number)
    }

    /// Mutable access to a day by its number.
    pub fn day_mut(&mut self, day_number: u32) -> Option<&mut Day> {
        self.days
            .iter_mut()
            .find(|day| day.day_number() == day_number)
    }

    fn day_or_err(&mut self, day_number: u32) -> Result<&mut Day, ItineraryError> {
        self.day_mut(day_number)
            .ok_or(ItineraryError::UnknownDay { day_number })
    }

    /// Regenerate the days for a new date range and clamp the active day.
    ///
    /// # Errors
    ///
    /// Propagates [`DateRangeError`]; the itinerary is left unchanged.
    pub fn regenerate(&mut self, range: &DateRange) -> Result<(), DateRangeError> {
        self.days = generate_days(&self.days, range)?;
        self.active_day = clamp_active_day(self.active_day, self.days.len());
        Ok(())
    }

    /// Append a default day and return its number.
    pub fn add_day(&mut self) -> u32 {
        let day_number = self.days.last().map_or(1, |day| day.day_number() + 1);
        self.days.push(Day::new(day_number));
        day_number
    }

    /// Remove the day at `index`, renumber the rest and reset the active day.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::LastDay`] when only one day remains and
    /// [`ItineraryError::DayIndexOutOfRange`] for an unknown index.
    pub fn remove_day(&mut self, index: usize) -> Result<Day, ItineraryError> {
        if index >= self.days.len() {
            return Err(ItineraryError::DayIndexOutOfRange {
                index,
                len: self.days.len(),
            });
        }
        if self.days.len() == 1 {
            return Err(ItineraryError::LastDay);
        }
        let removed = self.days.remove(index);
        self.renumber();
        self.active_day = 0;
        Ok(removed)
    }

    fn renumber(&mut self) {
        for (day_number, day) in (1..).zip(self.days.iter_mut()) {
            day.set_day_number(day_number);
        }
    }

    /// Schedule `poi_id` on the active day.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::Capacity`] when the POI does not fit.
    pub fn add_visit_to_active_day(
        &mut self,
        poi_id: PoiId,
        lookup: &impl DurationLookup,
    ) -> Result<Visit, ItineraryError> {
        let len = self.days.len();
        let day = self
            .days
            .get_mut(self.active_day)
            .ok_or(ItineraryError::DayIndexOutOfRange {
                index: self.active_day,
                len,
            })?;
        Ok(day.add_visit(poi_id, lookup)?)
    }

    /// Schedule `poi_id` on the day numbered `day_number`.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::UnknownDay`] or [`ItineraryError::Capacity`].
    pub fn add_visit(
        &mut self,
        day_number: u32,
        poi_id: PoiId,
        lookup: &impl DurationLookup,
    ) -> Result<Visit, ItineraryError> {
        Ok(self.day_or_err(day_number)?.add_visit(poi_id, lookup)?)
    }

    /// Remove the visit at `index` from day `day_number`.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::UnknownDay`]; an out-of-range visit index
    /// yields `Ok(None)`.
    pub fn remove_visit(
        &mut self,
        day_number: u32,
        index: usize,
    ) -> Result<Option<Visit>, ItineraryError> {
        Ok(self.day_or_err(day_number)?.remove_visit(index))
    }

    /// Every visit across all days, in day then visit order.
    #[must_use]
    pub fn planned_visits(&self) -> Vec<PlannedVisit> {
        self.days
            .iter()
            .flat_map(|day| {
                day.visits().iter().map(|visit| PlannedVisit {
                    poi_id: visit.poi_id,
                    day_number: day.day_number(),
                    visit_order: visit.visit_order,
                })
            })
            .collect()
    }

    /// Time accounting for each day.
    #[must_use]
    pub fn usage(&self, lookup: &impl DurationLookup) -> Vec<DayUsage> {
        self.days.iter().map(|day| day.usage(lookup)).collect()
    }
}
