//! In-memory backend doubles.
//!
//! [`StubPriceEstimator`] and [`StubTripGateway`] answer with canned results
//! and record every request, so callers can be tested without a server.

use std::sync::{Mutex, PoisonError};

use itinera_core::{
    BackendError, CreateTripPayload, PriceEstimator, PriceQuote, PriceRequest, TripGateway,
    TripReceipt,
};

/// Stub [`PriceEstimator`] returning a fixed outcome.
///
/// # Example
///
/// ```
/// use itinera_core::{PriceQuote, PriceEstimator};
/// use itinera_data::backend::test_support::StubPriceEstimator;
///
/// let estimator = StubPriceEstimator::with_quote(PriceQuote::default());
/// assert!(estimator.requests().is_empty());
/// ```
#[derive(Debug)]
pub struct StubPriceEstimator {
    outcome: Result<PriceQuote, BackendError>,
    requests: Mutex<Vec<PriceRequest>>,
}

impl StubPriceEstimator {
    /// Answer every request with `quote`.
    #[must_use]
    pub const fn with_quote(quote: PriceQuote) -> Self {
        Self {
            outcome: Ok(quote),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every request with `error`.
    #[must_use]
    pub const fn with_error(error: BackendError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<PriceRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PriceEstimator for StubPriceEstimator {
    fn estimate(&self, request: &PriceRequest) -> Result<PriceQuote, BackendError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.outcome.clone()
    }
}

/// A call recorded by [`StubTripGateway`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedTripCall {
    /// `create_trip` was called.
    Create(CreateTripPayload),
    /// `update_trip` was called for the given id.
    Update(u64, CreateTripPayload),
}

/// Stub [`TripGateway`] returning a fixed outcome.
#[derive(Debug)]
pub struct StubTripGateway {
    outcome: Result<TripReceipt, BackendError>,
    calls: Mutex<Vec<RecordedTripCall>>,
}

impl StubTripGateway {
    /// Accept every call and answer with `receipt`.
    #[must_use]
    pub const fn accepting(receipt: TripReceipt) -> Self {
        Self {
            outcome: Ok(receipt),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reject every call with `error`.
    #[must_use]
    pub const fn with_error(error: BackendError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedTripCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, call: RecordedTripCall) -> Result<TripReceipt, BackendError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        self.outcome.clone()
    }
}

impl TripGateway for StubTripGateway {
    fn create_trip(&self, payload: &CreateTripPayload) -> Result<TripReceipt, BackendError> {
        self.record(RecordedTripCall::Create(payload.clone()))
    }

    fn update_trip(
        &self,
        trip_id: u64,
        payload: &CreateTripPayload,
    ) -> Result<TripReceipt, BackendError> {
        self.record(RecordedTripCall::Update(trip_id, payload.clone()))
    }
}
