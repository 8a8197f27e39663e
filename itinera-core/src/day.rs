//! Itinerary days, their POI visits, and the capacity rule.
//!
//! A day owns a time window and an ordered list of visits. Visit orders are
//! kept dense (`1..=n`) by every mutation, and a visit is only accepted when
//! the summed visit durations still fit inside the window.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DurationLookup, PoiId, TimeOfDay, TimeOfDayError};

/// One POI visit scheduled on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Visited point of interest.
    pub poi_id: PoiId,
    /// 1-based position within the day.
    pub visit_order: u32,
}

/// A day of the itinerary.
///
/// # Examples
/// ```
/// use itinera_core::{Day, VisitDuration};
///
/// let lookup = |_: u64| VisitDuration::from_minutes(120);
/// let mut day = Day::new(1);
/// day.add_visit(10, &lookup)?;
/// day.add_visit(11, &lookup)?;
/// assert_eq!(day.visits().len(), 2);
/// assert_eq!(day.usage(&lookup).remaining_minutes, 300);
/// # Ok::<(), itinera_core::CapacityExceeded>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DayRecord")]
pub struct Day {
    day_number: u32,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    description: String,
    #[serde(rename = "pois")]
    visits: Vec<Visit>,
}

/// Raised when a POI does not fit in the remaining time of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "POI {poi_id} needs {required_minutes} min but day {day_number} has {remaining_minutes} min left"
)]
pub struct CapacityExceeded {
    /// Day that rejected the visit.
    pub day_number: u32,
    /// POI that did not fit.
    pub poi_id: PoiId,
    /// Minutes the POI needs.
    pub required_minutes: u32,
    /// Minutes left in the day before the visit (negative for inverted windows).
    pub remaining_minutes: i64,
}

/// Time accounting for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayUsage {
    /// Day the figures belong to.
    pub day_number: u32,
    /// Length of the day window in minutes.
    pub window_minutes: i64,
    /// Minutes consumed by scheduled visits.
    pub used_minutes: u64,
    /// `window_minutes - used_minutes`; negative when over-committed.
    pub remaining_minutes: i64,
}

impl Day {
    /// A default day: 09:00 to 18:00, no description, no visits.
    #[must_use]
    pub const fn new(day_number: u32) -> Self {
        Self {
            day_number,
            start_time: TimeOfDay::DAY_START,
            end_time: TimeOfDay::DAY_END,
            description: String::new(),
            visits: Vec::new(),
        }
    }

    /// 1-based position of the day in its itinerary.
    #[must_use]
    pub const fn day_number(&self) -> u32 {
        self.day_number
    }

    pub(crate) const fn set_day_number(&mut self, day_number: u32) {
        self.day_number = day_number;
    }

    /// Start of the day window.
    #[must_use]
    pub const fn start_time(&self) -> TimeOfDay {
        self.start_time
    }

    /// End of the day window.
    #[must_use]
    pub const fn end_time(&self) -> TimeOfDay {
        self.end_time
    }

    /// Free-form description of the day.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Scheduled visits in visit order.
    #[must_use]
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Replace the day window. Existing visits are kept even if they no
    /// longer fit; [`Day::usage`] reports the overrun.
    pub const fn set_window(&mut self, start: TimeOfDay, end: TimeOfDay) {
        self.start_time = start;
        self.end_time = end;
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Signed length of the window in minutes.
    #[must_use]
    pub fn window_minutes(&self) -> i64 {
        self.start_time.minutes_until(self.end_time)
    }

    /// Summed duration of all scheduled visits.
    #[must_use]
    pub fn used_minutes(&self, lookup: &impl DurationLookup) -> u64 {
        self.visits
            .iter()
            .map(|visit| u64::from(lookup.visit_duration(visit.poi_id).minutes()))
            .sum()
    }

    /// Window, used, and remaining minutes for this day.
    #[must_use]
    pub fn usage(&self, lookup: &impl DurationLookup) -> DayUsage {
        let window_minutes = self.window_minutes();
        let used_minutes = self.used_minutes(lookup);
        let used = i64::try_from(used_minutes).unwrap_or(i64::MAX);
        DayUsage {
            day_number: self.day_number,
            window_minutes,
            used_minutes,
            remaining_minutes: window_minutes.saturating_sub(used),
        }
    }

    /// Whether `poi_id` still fits. An exact fit is accepted.
    #[must_use]
    pub fn fits(&self, poi_id: PoiId, lookup: &impl DurationLookup) -> bool {
        let Ok(window) = u64::try_from(self.window_minutes()) else {
            return false;
        };
        let incoming = u64::from(lookup.visit_duration(poi_id).minutes());
        self.used_minutes(lookup).saturating_add(incoming) <= window
    }

    /// Append a visit to `poi_id` if it fits in the remaining window.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityExceeded`] and leaves the day untouched when the
    /// visit would overrun the window.
    pub fn add_visit(
        &mut self,
        poi_id: PoiId,
        lookup: &impl DurationLookup,
    ) -> Result<Visit, CapacityExceeded> {
        if !self.fits(poi_id, lookup) {
            let rejection = CapacityExceeded {
                day_number: self.day_number,
                poi_id,
                required_minutes: lookup.visit_duration(poi_id).minutes(),
                remaining_minutes: self.usage(lookup).remaining_minutes,
            };
            log::warn!("{rejection}");
            return Err(rejection);
        }
        let visit_order = self.visits.last().map_or(1, |last| last.visit_order + 1);
        let visit = Visit {
            poi_id,
            visit_order,
        };
        self.visits.push(visit);
        log::debug!(
            "scheduled POI {poi_id} as visit {visit_order} on day {}",
            self.day_number
        );
        Ok(visit)
    }

    /// Remove the visit at `index` and close the gap in visit orders.
    ///
    /// Out-of-range indices leave the day unchanged and return `None`.
    ///
    /// # Examples
    /// ```
    /// use itinera_core::{Day, VisitDuration};
    ///
    /// let lookup = |_: u64| VisitDuration::ZERO;
    /// let mut day = Day::new(1);
    /// for poi in [1, 2, 3] {
    ///     day.add_visit(poi, &lookup)?;
    /// }
    /// day.remove_visit(1);
    /// let orders: Vec<_> = day.visits().iter().map(|v| (v.poi_id, v.visit_order)).collect();
    /// assert_eq!(orders, vec![(1, 1), (3, 2)]);
    /// # Ok::<(), itinera_core::CapacityExceeded>(())
    /// ```
    pub fn remove_visit(&mut self, index: usize) -> Option<Visit> {
        if index >= self.visits.len() {
            log::debug!(
                "ignoring removal of visit {index} from day {} with {} visits",
                self.day_number,
                self.visits.len()
            );
            return None;
        }
        let removed = self.visits.remove(index);
        self.resequence();
        Some(removed)
    }

    fn resequence(&mut self) {
        for (order, visit) in (1..).zip(self.visits.iter_mut()) {
            visit.visit_order = order;
        }
    }
}

/// Check whether `poi_id` fits in the remaining window of `day`.
///
/// Equivalent to [`Day::fits`].
#[must_use]
pub fn fits_in_day(day: &Day, poi_id: PoiId, lookup: &impl DurationLookup) -> bool {
    day.fits(poi_id, lookup)
}

/// Loose wire form of a day as stored by the backend.
///
/// Times may carry seconds or be absent, and visits may arrive unordered
/// under either `pois` or `tripPois`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Day number as stored.
    pub day_number: u32,
    /// Window start, `"HH:MM"` or `"HH:MM:SS"`.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Window end, `"HH:MM"` or `"HH:MM:SS"`.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Visits in any order.
    #[serde(default, alias = "tripPois")]
    pub pois: Vec<Visit>,
}

fn parse_or(raw: Option<&str>, fallback: TimeOfDay) -> Result<TimeOfDay, TimeOfDayError> {
    raw.map_or(Ok(fallback), str::parse)
}

impl TryFrom<DayRecord> for Day {
    type Error = TimeOfDayError;

    fn try_from(record: DayRecord) -> Result<Self, Self::Error> {
        let start_time = parse_or(record.start_time.as_deref(), TimeOfDay::DAY_START)?;
        let end_time = parse_or(record.end_time.as_deref(), TimeOfDay::DAY_END)?;
        let mut visits = record.pois;
        visits.sort_by_key(|visit| visit.visit_order);
        let mut day = Self {
            day_number: record.day_number,
            start_time,
            end_time,
            description: record.description.unwrap_or_default(),
            visits,
        };
        day.resequence();
        Ok(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VisitDuration;
    use crate::test_support::FixedDurations;
    use rstest::{fixture, rstest};

    #[fixture]
    fn durations() -> FixedDurations {
        FixedDurations::from_minutes([(1, 120), (2, 300), (3, 120), (4, 121)])
    }

    fn orders(day: &Day) -> Vec<(PoiId, u32)> {
        day.visits()
            .iter()
            .map(|v| (v.poi_id, v.visit_order))
            .collect()
    }

    #[rstest]
    fn exact_fit_is_accepted(durations: FixedDurations) {
        let mut day = Day::new(1);
        day.add_visit(1, &durations).expect("A fits");
        day.add_visit(2, &durations).expect("B fits");
        day.add_visit(3, &durations).expect("C fills the day exactly");
        assert_eq!(day.usage(&durations).remaining_minutes, 0);
        assert_eq!(orders(&day), vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[rstest]
    fn one_minute_over_is_rejected(durations: FixedDurations) {
        let mut day = Day::new(1);
        day.add_visit(1, &durations).expect("A fits");
        day.add_visit(2, &durations).expect("B fits");
        let before = day.clone();
        let err = day.add_visit(4, &durations).expect_err("one minute too long");
        assert_eq!(
            err,
            CapacityExceeded {
                day_number: 1,
                poi_id: 4,
                required_minutes: 121,
                remaining_minutes: 120,
            }
        );
        assert_eq!(day, before);
    }

    #[rstest]
    fn unknown_pois_take_no_time(durations: FixedDurations) {
        let mut day = Day::new(2);
        day.set_window(
            TimeOfDay::from_hm(10, 0).expect("valid"),
            TimeOfDay::from_hm(10, 0).expect("valid"),
        );
        assert!(fits_in_day(&day, 42, &durations));
        assert!(!fits_in_day(&day, 1, &durations));
    }

    #[rstest]
    fn inverted_window_rejects_everything(durations: FixedDurations) {
        let mut day = Day::new(1);
        day.set_window(TimeOfDay::DAY_END, TimeOfDay::DAY_START);
        assert!(!day.fits(42, &durations));
        assert!(day.add_visit(42, &durations).is_err());
    }

    #[rstest]
    fn removal_resequences_visits() {
        let lookup = |_: PoiId| VisitDuration::ZERO;
        let mut day = Day::new(1);
        for poi in [1, 2, 3] {
            day.add_visit(poi, &lookup).expect("zero-length visits fit");
        }
        let removed = day.remove_visit(1).expect("index in range");
        assert_eq!(removed.poi_id, 2);
        assert_eq!(orders(&day), vec![(1, 1), (3, 2)]);
        assert_eq!(day.add_visit(9, &lookup).map(|v| v.visit_order), Ok(3));
    }

    #[rstest]
    fn out_of_range_removal_is_a_no_op() {
        let lookup = |_: PoiId| VisitDuration::ZERO;
        let mut day = Day::new(1);
        day.add_visit(1, &lookup).expect("fits");
        assert_eq!(day.remove_visit(5), None);
        assert_eq!(orders(&day), vec![(1, 1)]);
    }

    #[rstest]
    fn record_conversion_sorts_and_truncates() {
        let json = r#"{
            "dayNumber": 2,
            "startTime": "08:30:00",
            "tripPois": [
                {"poiId": 7, "visitOrder": 4},
                {"poiId": 5, "visitOrder": 1}
            ]
        }"#;
        let day: Day = serde_json::from_str(json).expect("valid record");
        assert_eq!(day.start_time().to_string(), "08:30");
        assert_eq!(day.end_time(), TimeOfDay::DAY_END);
        assert_eq!(orders(&day), vec![(5, 1), (7, 2)]);
    }

    #[rstest]
    fn serialises_wire_shape() {
        let lookup = |_: PoiId| VisitDuration::ZERO;
        let mut day = Day::new(1);
        day.set_description("Old town");
        day.add_visit(3, &lookup).expect("fits");
        let value = serde_json::to_value(&day).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "dayNumber": 1,
                "startTime": "09:00",
                "endTime": "18:00",
                "description": "Old town",
                "pois": [{"poiId": 3, "visitOrder": 1}]
            })
        );
    }
}
