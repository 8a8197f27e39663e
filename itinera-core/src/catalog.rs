//! Read-only access to POI visit durations.
//!
//! The capacity checker never owns attraction data. It asks a
//! [`DurationLookup`] how long a POI takes and treats unknown POIs as
//! zero-length visits.

use std::collections::HashMap;
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

use crate::VisitDuration;

/// Identifier of a point of interest in the backend catalogue.
pub type PoiId = u64;

/// Resolve the average visit duration of a POI.
///
/// Implementations must return [`VisitDuration::ZERO`] for unknown POIs
/// rather than failing. Closures of the form `Fn(PoiId) -> VisitDuration`
/// implement the trait directly.
///
/// # Examples
/// ```
/// use itinera_core::{DurationLookup, VisitDuration};
///
/// let lookup = |id: u64| VisitDuration::from_minutes(if id == 1 { 30 } else { 0 });
/// assert_eq!(lookup.visit_duration(1).minutes(), 30);
/// assert_eq!(lookup.visit_duration(2), VisitDuration::ZERO);
/// ```
pub trait DurationLookup {
    /// Duration of a visit to `poi_id`.
    fn visit_duration(&self, poi_id: PoiId) -> VisitDuration;
}

impl<F> DurationLookup for F
where
    F: Fn(PoiId) -> VisitDuration,
{
    fn visit_duration(&self, poi_id: PoiId) -> VisitDuration {
        self(poi_id)
    }
}

impl<S: BuildHasher> DurationLookup for HashMap<PoiId, VisitDuration, S> {
    fn visit_duration(&self, poi_id: PoiId) -> VisitDuration {
        self.get(&poi_id).copied().unwrap_or_default()
    }
}

/// An attraction as listed for a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    /// Backend identifier, used as the POI id in itineraries.
    pub id: PoiId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Average visit duration as published, usually `"HH:MM:SS"`.
    #[serde(default)]
    pub avg_duration: Option<String>,
}

impl Attraction {
    /// Parsed visit duration; malformed or missing values count as zero.
    #[must_use]
    pub fn visit_duration(&self) -> VisitDuration {
        VisitDuration::parse_lenient(self.avg_duration.as_deref())
    }
}

/// Attractions of a city indexed by id.
///
/// # Examples
/// ```
/// use itinera_core::{Attraction, AttractionCatalog, DurationLookup};
///
/// let catalog = AttractionCatalog::from_attractions([Attraction {
///     id: 7,
///     name: "Citadel".into(),
///     avg_duration: Some("01:30:00".into()),
/// }]);
/// assert_eq!(catalog.visit_duration(7).minutes(), 90);
/// assert_eq!(catalog.visit_duration(8).minutes(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttractionCatalog {
    attractions: HashMap<PoiId, Attraction>,
}

impl AttractionCatalog {
    /// Build a catalogue. Later duplicates replace earlier entries.
    #[must_use]
    pub fn from_attractions<I>(attractions: I) -> Self
    where
        I: IntoIterator<Item = Attraction>,
    {
        Self {
            attractions: attractions.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    /// Look up an attraction by id.
    #[must_use]
    pub fn get(&self, poi_id: PoiId) -> Option<&Attraction> {
        self.attractions.get(&poi_id)
    }

    /// Number of attractions in the catalogue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }
}

impl DurationLookup for AttractionCatalog {
    fn visit_duration(&self, poi_id: PoiId) -> VisitDuration {
        self.get(poi_id).map_or_else(
            || {
                log::warn!("POI {poi_id} is not in the attraction catalogue; assuming zero duration");
                VisitDuration::ZERO
            },
            Attraction::visit_duration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> AttractionCatalog {
        AttractionCatalog::from_attractions([
            Attraction {
                id: 1,
                name: "Old Souk".into(),
                avg_duration: Some("02:00:00".into()),
            },
            Attraction {
                id: 2,
                name: "Museum".into(),
                avg_duration: None,
            },
            Attraction {
                id: 3,
                name: "Garden".into(),
                avg_duration: Some("later".into()),
            },
        ])
    }

    #[rstest]
    #[case(1, 120)]
    #[case(2, 0)]
    #[case(3, 0)]
    #[case(99, 0)]
    fn resolves_durations(catalog: AttractionCatalog, #[case] id: PoiId, #[case] minutes: u32) {
        assert_eq!(catalog.visit_duration(id).minutes(), minutes);
    }

    #[rstest]
    fn map_lookup_defaults_to_zero() {
        let map = HashMap::from([(5, VisitDuration::from_minutes(45))]);
        assert_eq!(map.visit_duration(5).minutes(), 45);
        assert_eq!(map.visit_duration(6), VisitDuration::ZERO);
    }

    #[rstest]
    fn deserialises_backend_attraction() {
        let attraction: Attraction =
            serde_json::from_str(r#"{"id":4,"name":"Tower","avgDuration":"00:40:00","extra":1}"#)
                .expect("valid attraction");
        assert_eq!(attraction.visit_duration().minutes(), 40);
    }
}
