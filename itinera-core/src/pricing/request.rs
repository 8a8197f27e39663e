//! The body sent to the price estimator.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::{DateRangeError, Location, PlannedVisit, TripDraft};

/// A meeting or drop-off point as the estimator expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLocation {
    /// Street address.
    pub location_address: String,
    /// Longitude, `0.0` when only the address is known.
    pub lon: f64,
    /// Latitude, `0.0` when only the address is known.
    pub lat: f64,
}

impl PricedLocation {
    fn from_location(location: &Location) -> Option<Self> {
        match location.coord {
            Some(coord) => Some(Self {
                location_address: location.address.clone(),
                lon: coord.x,
                lat: coord.y,
            }),
            None if !location.address.trim().is_empty() => Some(Self {
                location_address: location.address.clone(),
                lon: 0.0,
                lat: 0.0,
            }),
            None => None,
        }
    }
}

/// Rooms to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRequest {
    /// Selected hotel.
    pub hotel_id: u64,
    /// Selected room type.
    pub room_type_id: u64,
    /// Rooms to price.
    pub rooms_requested: u32,
}

/// Reasons a price request cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceRequestError {
    /// Start or end date is missing.
    #[error("select start and end dates before requesting a price")]
    MissingDates,
    /// The dates do not form a usable range.
    #[error(transparent)]
    InvalidDates(#[from] DateRangeError),
    /// The party size is zero.
    #[error("party size must be at least one")]
    NoTravellers,
}

/// Body of `POST /trips/calculate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    /// City the trip runs in.
    pub city_id: u64,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Party size.
    pub people: u32,
    /// Meals included.
    pub with_meals: bool,
    /// Transport included.
    pub with_transport: bool,
    /// Hotel included.
    pub hotel_included: bool,
    /// Whether a guide is booked.
    pub include_guide: bool,
    /// Selected guide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_id: Option<String>,
    /// Meeting point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_location: Option<PricedLocation>,
    /// Drop-off point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_location: Option<PricedLocation>,
    /// Every scheduled visit.
    pub pois: Vec<PlannedVisit>,
    /// Rooms to price; omitted unless a hotel is included and selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotels: Option<Vec<HotelRequest>>,
}

impl PriceRequest {
    /// Assemble a request for `people` travellers from `draft`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceRequestError`] when the dates are missing or inverted
    /// or when `people` is zero.
    pub fn from_draft(draft: &TripDraft, people: u32) -> Result<Self, PriceRequestError> {
        if people == 0 {
            return Err(PriceRequestError::NoTravellers);
        }
        let range = draft.date_range().ok_or(PriceRequestError::MissingDates)?;
        let itinerary = draft.itinerary_for(&range)?;
        let guide_id = draft.guide_id.clone().filter(|g| !g.is_empty());
        let hotels = draft.hotel_booking().map(|booking| {
            vec![HotelRequest {
                hotel_id: booking.hotel_id,
                room_type_id: booking.room_type_id,
                rooms_requested: booking.rooms_needed,
            }]
        });
        Ok(Self {
            city_id: draft.city_id,
            start_date: range.start_date,
            end_date: range.end_date,
            people,
            with_meals: draft.with_meals,
            with_transport: draft.with_transport,
            hotel_included: draft.hotel_included,
            include_guide: guide_id.is_some(),
            guide_id,
            meet_location: draft
                .meet_location
                .as_ref()
                .and_then(PricedLocation::from_location),
            drop_location: draft
                .drop_location
                .as_ref()
                .and_then(PricedLocation::from_location),
            pois: itinerary.planned_visits(),
            hotels,
        })
    }
}
