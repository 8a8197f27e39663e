//! Core domain types for Itinera trip planning.
//!
//! Trips are split into numbered days, each with a time window and an
//! ordered list of POI visits. The types here generate days from a date
//! range, enforce that visits fit their day window, and describe the
//! boundary to the remote price estimator and trip store. Nothing in this
//! crate performs I/O; backends implement [`PriceEstimator`] and
//! [`TripGateway`].

#![forbid(unsafe_code)]

mod backend;
mod catalog;
mod date_range;
mod day;
mod duration;
mod itinerary;
mod pricing;
mod time_of_day;
mod trip;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use backend::BackendError;
pub use catalog::{Attraction, AttractionCatalog, DurationLookup, PoiId};
pub use date_range::{DateRange, DateRangeError, MAX_TRIP_DAYS};
pub use day::{CapacityExceeded, Day, DayRecord, DayUsage, Visit, fits_in_day};
pub use duration::{DurationParseError, VisitDuration};
pub use itinerary::{Itinerary, ItineraryError, PlannedVisit, clamp_active_day, generate_days};
pub use pricing::{
    Amount, HotelRequest, PriceEstimator, PriceQuote, PriceRequest, PriceRequestError,
    PricedLocation,
};
pub use time_of_day::{TimeOfDay, TimeOfDayError};
pub use trip::{
    CreateTripPayload, GeoPoint, HotelBooking, HotelSelection, Location, TripDraft, TripGateway,
    TripReceipt, TripType, TripValidationError,
};
