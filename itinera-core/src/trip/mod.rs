//! Trip drafts and their submission to the backend.
//!
//! A [`TripDraft`] is everything the trip form collects. It validates
//! itself, renders the creation payload, and absorbs suggested prices from
//! a [`crate::PriceQuote`]. Delivery is delegated to a [`TripGateway`].

mod draft;
mod gateway;
mod payload;

pub use draft::{HotelSelection, Location, TripDraft, TripType, TripValidationError};
pub use gateway::{TripGateway, TripReceipt};
pub use payload::{CreateTripPayload, GeoPoint, HotelBooking};
