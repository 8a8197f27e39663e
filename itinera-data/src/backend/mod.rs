//! HTTP client for the trip backend.
//!
//! [`HttpBackend`] implements the synchronous [`itinera_core::PriceEstimator`]
//! and [`itinera_core::TripGateway`] traits by blocking on `reqwest` calls.
//! Each call makes exactly one request; failures are returned, never retried.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use itinera_core::{PriceEstimator, PriceRequest, TripDraft};
//! use itinera_data::backend::{HttpBackend, HttpBackendConfig};
//!
//! let config = HttpBackendConfig::new("https://api.example.com")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_api_token("secret");
//! let backend = HttpBackend::with_config(config)?;
//! # let draft = TripDraft::new("Trip", 1);
//! let request = PriceRequest::from_draft(&draft, 2)?;
//! let quote = backend.estimate(&request)?;
//! # let _ = quote;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod wire;

#[doc(hidden)]
pub mod test_support;

pub use client::{BackendBuildError, DEFAULT_USER_AGENT, HttpBackend, HttpBackendConfig};
