//! The trip form as a plain value.

use chrono::NaiveDate;
use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::payload::{CreateTripPayload, GeoPoint, HotelBooking};
use crate::{DateRange, DateRangeError, Itinerary, PriceQuote};

/// Whether a trip is sold from the catalogue or built for one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripType {
    /// Catalogue trip with fixed dates.
    #[default]
    Predefined,
    /// Bespoke trip.
    Custom,
}

/// A named place with optional coordinates (`x = longitude`, `y = latitude`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Human-readable address.
    #[serde(default)]
    pub address: String,
    /// WGS84 position, when known.
    #[serde(default)]
    pub coord: Option<Coord<f64>>,
}

impl Location {
    fn is_complete(&self) -> bool {
        !self.address.trim().is_empty() && self.coord.is_some()
    }
}

/// Hotel and room choice for trips that include accommodation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSelection {
    /// Chosen hotel.
    #[serde(default)]
    pub hotel_id: Option<u64>,
    /// Chosen room type.
    #[serde(default)]
    pub room_type_id: Option<u64>,
    /// Rooms to reserve.
    #[serde(default = "default_rooms")]
    pub rooms_needed: u32,
    /// Hotel street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Hotel position.
    #[serde(default)]
    pub location: Option<Coord<f64>>,
}

const fn default_rooms() -> u32 {
    1
}

impl HotelSelection {
    const fn booking(&self) -> Option<HotelBooking> {
        match (self.hotel_id, self.room_type_id) {
            (Some(hotel_id), Some(room_type_id)) if self.rooms_needed > 0 => Some(HotelBooking {
                hotel_id,
                room_type_id,
                rooms_needed: self.rooms_needed,
            }),
            _ => None,
        }
    }
}

/// Reasons a draft cannot be submitted, checked in this order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripValidationError {
    /// No cover image was chosen.
    #[error("please select a main image")]
    MissingMainImage,
    /// The name is empty or whitespace.
    #[error("please enter a name")]
    MissingName,
    /// Start or end date is missing.
    #[error("please select start and end dates")]
    MissingDates,
    /// The dates do not form a usable range.
    #[error(transparent)]
    InvalidDates(#[from] DateRangeError),
    /// Hotel trips need a hotel, a room type and at least one room.
    #[error("please select a hotel, room type, and rooms needed")]
    IncompleteHotelSelection,
    /// Trips without a hotel need both meeting points.
    #[error("please set meet and drop locations and addresses")]
    MissingMeetingPoints,
}

const fn default_min_people() -> u32 {
    1
}

const fn default_max_people() -> u32 {
    10
}

const fn default_min_seats() -> u32 {
    1
}

const fn default_max_seats() -> u32 {
    2
}

/// Everything collected by the trip form.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use itinera_core::TripDraft;
///
/// let mut draft = TripDraft::new("Old Damascus", 3);
/// draft.set_dates(
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
/// )?;
/// assert_eq!(draft.itinerary.days().len(), 3);
/// # Ok::<(), itinera_core::DateRangeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDraft {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// City the trip runs in.
    pub city_id: u64,
    /// Catalogue or bespoke trip.
    #[serde(default)]
    pub trip_type: TripType,
    /// First day of the trip.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the trip (inclusive).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Advertised price per person.
    #[serde(default)]
    pub price_per_person: f64,
    /// Minimum party size.
    #[serde(default = "default_min_people")]
    pub min_people: u32,
    /// Maximum party size.
    #[serde(default = "default_max_people")]
    pub max_people: u32,
    /// Minimum seats a single user may book.
    #[serde(default = "default_min_seats")]
    pub min_seats_per_user: u32,
    /// Maximum seats a single user may book.
    #[serde(default = "default_max_seats")]
    pub max_seats_per_user: u32,
    /// Meals included.
    #[serde(default)]
    pub with_meals: bool,
    /// Transport included.
    #[serde(default)]
    pub with_transport: bool,
    /// Hotel included.
    #[serde(default)]
    pub hotel_included: bool,
    /// Meal price per person.
    #[serde(default)]
    pub meal_price_per_person: f64,
    /// Transport price per person.
    #[serde(default)]
    pub transportation_price_per_person: f64,
    /// Assigned guide.
    #[serde(default)]
    pub guide_id: Option<String>,
    /// Where the party meets.
    #[serde(default)]
    pub meet_location: Option<Location>,
    /// Where the party is dropped off.
    #[serde(default)]
    pub drop_location: Option<Location>,
    /// Cover image.
    #[serde(default)]
    pub main_image_id: Option<u64>,
    /// Additional images.
    #[serde(default)]
    pub gallery_image_ids: Vec<u64>,
    /// Day plan.
    #[serde(default, rename = "tripDays")]
    pub itinerary: Itinerary,
    /// Accommodation choice.
    #[serde(default)]
    pub hotel: Option<HotelSelection>,
    /// Attached tags.
    #[serde(default)]
    pub tag_ids: Vec<u64>,
}

impl TripDraft {
    /// An empty draft for `city_id` with the form's defaults.
    #[must_use]
    pub fn new(name: impl Into<String>, city_id: u64) -> Self {
        Self {
            name: name.into(),
            city_id,
            trip_type: TripType::default(),
            start_date: None,
            end_date: None,
            price_per_person: 0.0,
            min_people: default_min_people(),
            max_people: default_max_people(),
            min_seats_per_user: default_min_seats(),
            max_seats_per_user: default_max_seats(),
            with_meals: false,
            with_transport: false,
            hotel_included: false,
            meal_price_per_person: 0.0,
            transportation_price_per_person: 0.0,
            guide_id: None,
            meet_location: None,
            drop_location: None,
            main_image_id: None,
            gallery_image_ids: Vec::new(),
            itinerary: Itinerary::new(),
            hotel: None,
            tag_ids: Vec::new(),
        }
    }

    /// The trip dates, when both are set.
    #[must_use]
    pub const fn date_range(&self) -> Option<DateRange> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        }
    }

    /// Store new dates and regenerate the day plan from them.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError`] for an inverted range. The dates are still
    /// stored so validation can flag them, but the day plan is kept as is.
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), DateRangeError> {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self.itinerary.regenerate(&DateRange::new(start, end))
    }

    /// Rebuild the day plan from the stored dates.
    ///
    /// Drafts read back from storage carry their own `tripDays`, which may
    /// disagree with `startDate`/`endDate`. This runs the same regeneration
    /// as [`TripDraft::set_dates`]. Drafts without both dates are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError`] for an unusable range; the day plan is kept.
    pub fn sync_days(&mut self) -> Result<(), DateRangeError> {
        match self.date_range() {
            Some(range) => self.itinerary.regenerate(&range),
            None => Ok(()),
        }
    }

    /// The day plan as it will be sent for `range`: one day per date.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError`] for an unusable range.
    pub fn itinerary_for(&self, range: &DateRange) -> Result<Itinerary, DateRangeError> {
        let mut itinerary = self.itinerary.clone();
        itinerary.regenerate(range)?;
        Ok(itinerary)
    }

    /// Fix the party size; the form keeps min and max people equal to it.
    pub const fn set_party_size(&mut self, people: u32) {
        self.min_people = people;
        self.max_people = people;
    }

    /// Use the selected hotel as meeting and drop-off point.
    ///
    /// Applies only when a hotel is included and its position is known.
    /// Addresses are copied when the hotel has one.
    pub fn use_hotel_as_meeting_point(&mut self) {
        if !self.hotel_included {
            return;
        }
        let Some(hotel) = &self.hotel else {
            return;
        };
        let Some(coord) = hotel.location else {
            return;
        };
        let address = hotel.address.clone().filter(|a| !a.trim().is_empty());
        for slot in [&mut self.meet_location, &mut self.drop_location] {
            let location = slot.get_or_insert_with(Location::default);
            location.coord = Some(coord);
            if let Some(address) = &address {
                location.address.clone_from(address);
            }
        }
    }

    /// Check the draft can be submitted and return its date range.
    ///
    /// # Errors
    ///
    /// Returns the first [`TripValidationError`] encountered.
    pub fn validate(&self) -> Result<DateRange, TripValidationError> {
        if self.main_image_id.is_none() {
            return Err(TripValidationError::MissingMainImage);
        }
        if self.name.trim().is_empty() {
            return Err(TripValidationError::MissingName);
        }
        let range = self.date_range().ok_or(TripValidationError::MissingDates)?;
        range.day_count()?;
        if self.hotel_included {
            if self.hotel_booking().is_none() {
                return Err(TripValidationError::IncompleteHotelSelection);
            }
        } else if !self.meeting_points_complete() {
            return Err(TripValidationError::MissingMeetingPoints);
        }
        Ok(range)
    }

    fn meeting_points_complete(&self) -> bool {
        [&self.meet_location, &self.drop_location]
            .into_iter()
            .all(|slot| slot.as_ref().is_some_and(Location::is_complete))
    }

    /// The hotel reservation, when a hotel is included and fully selected.
    #[must_use]
    pub fn hotel_booking(&self) -> Option<HotelBooking> {
        if !self.hotel_included {
            return None;
        }
        self.hotel.as_ref().and_then(HotelSelection::booking)
    }

    /// Validate and render the trip-creation payload.
    ///
    /// # Errors
    ///
    /// Returns the first [`TripValidationError`] encountered.
    pub fn to_create_payload(&self) -> Result<CreateTripPayload, TripValidationError> {
        let range = self.validate()?;
        let itinerary = self.itinerary_for(&range)?;
        let main_image_id = self
            .main_image_id
            .ok_or(TripValidationError::MissingMainImage)?;
        let address = |slot: &Option<Location>| {
            slot.as_ref()
                .map(|l| l.address.trim().to_owned())
                .filter(|a| !a.is_empty())
        };
        let point = |slot: &Option<Location>| slot.as_ref().and_then(|l| l.coord).map(GeoPoint::from);
        Ok(CreateTripPayload {
            name: self.name.trim().to_owned(),
            city_id: self.city_id,
            trip_type: self.trip_type,
            start_date: range.start_date,
            end_date: range.end_date,
            price_per_person: self.price_per_person,
            min_people: self.min_people,
            max_people: self.max_people,
            min_seats_per_user: self.min_seats_per_user,
            max_seats_per_user: self.max_seats_per_user,
            with_meals: self.with_meals,
            with_transport: self.with_transport,
            hotel_included: self.hotel_included,
            meal_price_per_person: if self.with_meals {
                self.meal_price_per_person
            } else {
                0.0
            },
            transportation_price_per_person: if self.with_transport {
                self.transportation_price_per_person
            } else {
                0.0
            },
            guide_id: self.guide_id.clone().filter(|g| !g.is_empty()),
            meet_location_address: address(&self.meet_location),
            meet_location: point(&self.meet_location),
            drop_location_address: address(&self.drop_location),
            drop_location: point(&self.drop_location),
            main_image_id,
            gallery_image_ids: self.gallery_image_ids.clone(),
            trip_days: itinerary.days().to_vec(),
            hotels: self.hotel_booking().into_iter().collect(),
            tag_ids: self.tag_ids.clone(),
        })
    }

    /// Copy the per-person prices suggested by a quote into the draft.
    ///
    /// Missing or zero suggestions leave the current value alone.
    pub fn apply_quote(&mut self, quote: &PriceQuote) {
        if let Some(price) = quote.per_person.nonzero() {
            self.price_per_person = price;
        }
        if let Some(price) = quote.per_person_meals.and_then(|a| a.nonzero()) {
            self.meal_price_per_person = price;
        }
        if let Some(price) = quote.per_person_transport.and_then(|a| a.nonzero()) {
            self.transportation_price_per_person = price;
        }
    }
}
