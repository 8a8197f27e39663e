//! Facade crate for Itinera trip planning.
//!
//! This crate re-exports the core domain types and exposes the HTTP backend
//! and attraction catalogue loader behind the `backend-http` feature.

#![forbid(unsafe_code)]

pub use itinera_core::{
    Amount, Attraction, AttractionCatalog, BackendError, CapacityExceeded, CreateTripPayload,
    DateRange, DateRangeError, Day, DayUsage, DurationLookup, Itinerary, ItineraryError,
    PlannedVisit, PoiId, PriceEstimator, PriceQuote, PriceRequest, PriceRequestError, TimeOfDay,
    TripDraft, TripGateway, TripReceipt, TripValidationError, Visit, VisitDuration, fits_in_day,
    generate_days,
};

#[cfg(feature = "backend-http")]
pub use itinera_data::{
    BackendBuildError, CatalogError, HttpBackend, HttpBackendConfig, load_catalog,
    load_catalog_file,
};
