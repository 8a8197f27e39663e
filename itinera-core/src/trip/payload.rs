//! Wire shape of the trip-creation request.

use chrono::NaiveDate;
use geo::Coord;
use serde::Serialize;

use super::TripType;
use crate::Day;

/// Latitude/longitude pair as the backend expects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lon: coord.x,
        }
    }
}

/// Hotel rooms reserved for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelBooking {
    /// Selected hotel.
    pub hotel_id: u64,
    /// Selected room type.
    pub room_type_id: u64,
    /// Rooms to hold.
    pub rooms_needed: u32,
}

/// Body of `POST /trips` and `PATCH /trips/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripPayload {
    /// Trimmed trip name.
    pub name: String,
    /// City the trip runs in.
    pub city_id: u64,
    /// Catalogue or bespoke trip.
    pub trip_type: TripType,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Advertised price per person.
    pub price_per_person: f64,
    /// Minimum party size.
    pub min_people: u32,
    /// Maximum party size.
    pub max_people: u32,
    /// Minimum seats a single user may book.
    pub min_seats_per_user: u32,
    /// Maximum seats a single user may book.
    pub max_seats_per_user: u32,
    /// Meals included.
    pub with_meals: bool,
    /// Transport included.
    pub with_transport: bool,
    /// Hotel included.
    pub hotel_included: bool,
    /// Meal price per person; zero when meals are excluded.
    pub meal_price_per_person: f64,
    /// Transport price per person; zero when transport is excluded.
    pub transportation_price_per_person: f64,
    /// Assigned guide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_id: Option<String>,
    /// Meeting point address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_location_address: Option<String>,
    /// Meeting point coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_location: Option<GeoPoint>,
    /// Drop-off address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_location_address: Option<String>,
    /// Drop-off coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_location: Option<GeoPoint>,
    /// Cover image.
    pub main_image_id: u64,
    /// Additional images.
    pub gallery_image_ids: Vec<u64>,
    /// Day plan.
    pub trip_days: Vec<Day>,
    /// Hotel reservations; empty unless a hotel is included.
    pub hotels: Vec<HotelBooking>,
    /// Attached tags.
    pub tag_ids: Vec<u64>,
}
