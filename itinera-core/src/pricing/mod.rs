//! Price estimation boundary.
//!
//! [`PriceRequest`] is derived from a [`crate::TripDraft`] and sent to a
//! [`PriceEstimator`]. The resulting [`PriceQuote`] is read-only advice that
//! the draft may absorb through [`crate::TripDraft::apply_quote`].

mod quote;
mod request;

pub use quote::{Amount, PriceQuote};
pub use request::{HotelRequest, PriceRequest, PriceRequestError, PricedLocation};

use crate::BackendError;

/// Computes a price quote for a trip.
pub trait PriceEstimator {
    /// Estimate the price of `request`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the estimate cannot be obtained.
    fn estimate(&self, request: &PriceRequest) -> Result<PriceQuote, BackendError>;
}

impl<T: PriceEstimator + ?Sized> PriceEstimator for std::sync::Arc<T> {
    fn estimate(&self, request: &PriceRequest) -> Result<PriceQuote, BackendError> {
        (**self).estimate(request)
    }
}
