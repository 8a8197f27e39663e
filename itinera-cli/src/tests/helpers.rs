//! Test helpers for writing CLI inputs and stubbing the backend.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use geo::Coord;
use itinera_core::{
    BackendError, Location, PriceEstimator, PriceQuote, TripDraft, TripGateway, TripReceipt,
};
use itinera_data::backend::test_support::{StubPriceEstimator, StubTripGateway};
use tempfile::TempDir;

use crate::CliError;
use crate::backend::{BackendBuilder, BackendSettings};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test input");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Catalogue with a 4h fort, a 3h souk and a 2h museum.
pub(super) const CATALOG_JSON: &str = r#"{"data": [
    {"id": 1, "name": "Fort", "avgDuration": "04:00:00"},
    {"id": 2, "name": "Souk", "avgDuration": "03:00:00"},
    {"id": 3, "name": "Museum", "avgDuration": "02:00:00"}
]}"#;

pub(super) fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).expect("valid date")
}

/// A draft that passes validation: dates, cover image and meeting points.
pub(super) fn ready_draft() -> TripDraft {
    let mut draft = TripDraft::new("Old Town Walk", 7);
    draft.main_image_id = Some(11);
    draft.set_dates(date(10), date(12)).expect("valid range");
    let place = |address: &str| Location {
        address: address.to_owned(),
        coord: Some(Coord { x: 36.3, y: 33.5 }),
    };
    draft.meet_location = Some(place("North Gate"));
    draft.drop_location = Some(place("Station Square"));
    draft
}

pub(super) fn write_draft(path: &Utf8Path, draft: &TripDraft) {
    let payload = serde_json::to_vec_pretty(draft).expect("serialise draft");
    write_utf8(path, &payload);
}

/// Hands out shared stubs and remembers the settings it was asked for.
#[derive(Debug)]
pub(super) struct StubBackendBuilder {
    pub(super) estimator: Arc<StubPriceEstimator>,
    pub(super) gateway: Arc<StubTripGateway>,
    pub(super) settings: std::sync::Mutex<Vec<BackendSettings>>,
}

impl StubBackendBuilder {
    pub(super) fn quoting(quote: PriceQuote) -> Self {
        Self::new(
            StubPriceEstimator::with_quote(quote),
            StubTripGateway::accepting(TripReceipt::default()),
        )
    }

    pub(super) fn accepting(receipt: TripReceipt) -> Self {
        Self::new(
            StubPriceEstimator::with_quote(PriceQuote::default()),
            StubTripGateway::accepting(receipt),
        )
    }

    pub(super) fn failing(error: BackendError) -> Self {
        Self::new(
            StubPriceEstimator::with_error(error.clone()),
            StubTripGateway::with_error(error),
        )
    }

    fn new(estimator: StubPriceEstimator, gateway: StubTripGateway) -> Self {
        Self {
            estimator: Arc::new(estimator),
            gateway: Arc::new(gateway),
            settings: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(super) fn seen_settings(&self) -> Vec<BackendSettings> {
        self.settings.lock().expect("settings lock").clone()
    }

    fn remember(&self, settings: &BackendSettings) {
        self.settings
            .lock()
            .expect("settings lock")
            .push(settings.clone());
    }
}

impl BackendBuilder for StubBackendBuilder {
    fn estimator(&self, settings: &BackendSettings) -> Result<Box<dyn PriceEstimator>, CliError> {
        self.remember(settings);
        Ok(Box::new(Arc::clone(&self.estimator)))
    }

    fn gateway(&self, settings: &BackendSettings) -> Result<Box<dyn TripGateway>, CliError> {
        self.remember(settings);
        Ok(Box::new(Arc::clone(&self.gateway)))
    }
}
