//! Data sources and remote backends for Itinera.
//!
//! [`catalog`] loads attraction listings exported from the backend so visit
//! durations can be resolved offline. [`backend`] talks to the trip API over
//! HTTP and implements the core [`itinera_core::PriceEstimator`] and
//! [`itinera_core::TripGateway`] traits.

#![forbid(unsafe_code)]

pub mod backend;
pub mod catalog;

pub use backend::{BackendBuildError, DEFAULT_USER_AGENT, HttpBackend, HttpBackendConfig};
pub use catalog::{CatalogError, load_catalog, load_catalog_file};
