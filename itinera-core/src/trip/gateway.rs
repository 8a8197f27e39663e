//! Delivery of trip payloads to the backend.

use serde::{Deserialize, Serialize};

use super::CreateTripPayload;
use crate::BackendError;

/// Acknowledgement returned after a trip was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TripReceipt {
    /// Identifier assigned by the backend, when it echoes one.
    #[serde(default)]
    pub id: Option<u64>,
}

/// Stores trips on a remote backend.
///
/// Implementations perform a single attempt per call. Errors carry the
/// backend's own message so callers can show it verbatim.
pub trait TripGateway {
    /// Create a new trip.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the request fails or is rejected.
    fn create_trip(&self, payload: &CreateTripPayload) -> Result<TripReceipt, BackendError>;

    /// Replace the stored trip `trip_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the request fails or is rejected.
    fn update_trip(
        &self,
        trip_id: u64,
        payload: &CreateTripPayload,
    ) -> Result<TripReceipt, BackendError>;
}

impl<T: TripGateway + ?Sized> TripGateway for std::sync::Arc<T> {
    fn create_trip(&self, payload: &CreateTripPayload) -> Result<TripReceipt, BackendError> {
        (**self).create_trip(payload)
    }

    fn update_trip(
        &self,
        trip_id: u64,
        payload: &CreateTripPayload,
    ) -> Result<TripReceipt, BackendError> {
        (**self).update_trip(trip_id, payload)
    }
}
