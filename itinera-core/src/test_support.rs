//! Test-only duration tables used by unit and behaviour tests.

use std::collections::HashMap;

use crate::{DurationLookup, PoiId, VisitDuration};

/// Fixed POI durations keyed by id; unknown POIs take no time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedDurations {
    minutes: HashMap<PoiId, u32>,
}

impl FixedDurations {
    /// Build a table from `(poi_id, minutes)` pairs.
    #[must_use]
    pub fn from_minutes<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (PoiId, u32)>,
    {
        Self {
            minutes: pairs.into_iter().collect(),
        }
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, poi_id: PoiId, minutes: u32) {
        self.minutes.insert(poi_id, minutes);
    }
}

impl DurationLookup for FixedDurations {
    fn visit_duration(&self, poi_id: PoiId) -> VisitDuration {
        self.minutes
            .get(&poi_id)
            .copied()
            .map_or(VisitDuration::ZERO, VisitDuration::from_minutes)
    }
}
