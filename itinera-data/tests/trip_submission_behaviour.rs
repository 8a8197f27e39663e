//! Behavioural tests for submitting drafts through a `TripGateway`.

use chrono::NaiveDate;
use geo::Coord;
use itinera_core::test_support::FixedDurations;
use itinera_core::{
    BackendError, Location, TripDraft, TripGateway, TripReceipt, TripValidationError,
};
use itinera_data::backend::test_support::{RecordedTripCall, StubTripGateway};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use thiserror::Error;

#[derive(Debug, Error)]
enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] TripValidationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

fn submit(draft: &TripDraft, gateway: &dyn TripGateway) -> Result<TripReceipt, SubmitError> {
    let payload = draft.to_create_payload()?;
    Ok(gateway.create_trip(&payload)?)
}

#[fixture]
fn draft() -> RefCell<TripDraft> {
    RefCell::new(TripDraft::new("", 1))
}

#[fixture]
fn gateway() -> RefCell<Option<StubTripGateway>> {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> RefCell<Option<Result<TripReceipt, SubmitError>>> {
    RefCell::new(None)
}

#[given("a complete draft for a two-day trip")]
fn given_complete_draft(#[from(draft)] draft: &RefCell<TripDraft>) {
    let mut complete = TripDraft::new("Cedars and coast", 4);
    complete
        .set_dates(
            NaiveDate::from_ymd_opt(2024, 5, 3).expect("valid date"),
            NaiveDate::from_ymd_opt(2024, 5, 4).expect("valid date"),
        )
        .expect("valid range");
    complete.main_image_id = Some(12);
    let square = Location {
        address: "Main square".into(),
        coord: Some(Coord { x: 35.8, y: 34.2 }),
    };
    complete.meet_location = Some(square.clone());
    complete.drop_location = Some(square);
    *draft.borrow_mut() = complete;
}

#[given("a three-hour visit to attraction 8 on day two")]
fn given_visit(#[from(draft)] draft: &RefCell<TripDraft>) {
    let mut durations = FixedDurations::default();
    durations.insert(8, 180);
    draft
        .borrow_mut()
        .itinerary
        .add_visit(2, 8, &durations)
        .expect("visit fits");
}

#[given("the main image is cleared")]
fn given_no_image(#[from(draft)] draft: &RefCell<TripDraft>) {
    draft.borrow_mut().main_image_id = None;
}

#[given("a backend that accepts trips")]
fn given_accepting(#[from(gateway)] gateway: &RefCell<Option<StubTripGateway>>) {
    *gateway.borrow_mut() = Some(StubTripGateway::accepting(TripReceipt { id: Some(501) }));
}

#[given("a backend that rejects trips with \"Guide is busy on these dates\"")]
fn given_rejecting(#[from(gateway)] gateway: &RefCell<Option<StubTripGateway>>) {
    *gateway.borrow_mut() = Some(StubTripGateway::with_error(BackendError::Http {
        url: "https://api.example.com/trips".into(),
        status: 409,
        message: "Guide is busy on these dates".into(),
    }));
}

#[when("I submit the draft")]
fn when_submit(
    #[from(draft)] draft: &RefCell<TripDraft>,
    #[from(gateway)] gateway: &RefCell<Option<StubTripGateway>>,
    #[from(outcome)] outcome: &RefCell<Option<Result<TripReceipt, SubmitError>>>,
) {
    let gateway = gateway.borrow();
    let stub = gateway.as_ref().expect("gateway configured");
    *outcome.borrow_mut() = Some(submit(&draft.borrow(), stub));
}

#[then("the backend received one create call")]
fn then_one_call(#[from(gateway)] gateway: &RefCell<Option<StubTripGateway>>) {
    let calls = gateway.borrow().as_ref().expect("gateway configured").calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls.first(), Some(RecordedTripCall::Create(_))));
}

#[then("the payload schedules attraction 8 first on day two")]
fn then_payload_visit(#[from(gateway)] gateway: &RefCell<Option<StubTripGateway>>) {
    let calls = gateway.borrow().as_ref().expect("gateway configured").calls();
    let Some(RecordedTripCall::Create(payload)) = calls.first() else {
        panic!("expected a create call, got {calls:?}");
    };
    let day_two = payload
        .trip_days
        .iter()
        .find(|day| day.day_number() == 2)
        .expect("day two sent");
    let first = day_two.visits().first().expect("one visit");
    assert_eq!((first.poi_id, first.visit_order), (8, 1));
}

#[then("the created trip has id 501")]
fn then_receipt(#[from(outcome)] outcome: &RefCell<Option<Result<TripReceipt, SubmitError>>>) {
    let outcome = outcome.borrow();
    let receipt = outcome
        .as_ref()
        .expect("submitted")
        .as_ref()
        .expect("accepted");
    assert_eq!(receipt.id, Some(501));
}

#[then("submission fails asking for a main image")]
fn then_missing_image(
    #[from(outcome)] outcome: &RefCell<Option<Result<TripReceipt, SubmitError>>>,
) {
    let outcome = outcome.borrow();
    assert!(matches!(
        outcome.as_ref().expect("submitted"),
        Err(SubmitError::Invalid(TripValidationError::MissingMainImage))
    ));
}

#[then("the backend received no calls")]
fn then_no_calls(#[from(gateway)] gateway: &RefCell<Option<StubTripGateway>>) {
    assert!(
        gateway
            .borrow()
            .as_ref()
            .expect("gateway configured")
            .calls()
            .is_empty()
    );
}

#[then("submission fails with the backend message \"Guide is busy on these dates\"")]
fn then_backend_message(
    #[from(outcome)] outcome: &RefCell<Option<Result<TripReceipt, SubmitError>>>,
) {
    let outcome = outcome.borrow();
    let err = outcome
        .as_ref()
        .expect("submitted")
        .as_ref()
        .expect_err("rejected");
    let SubmitError::Backend(BackendError::Http { message, .. }) = err else {
        panic!("expected a backend rejection, got {err:?}");
    };
    assert_eq!(message, "Guide is busy on these dates");
}

#[then("the draft still has two days")]
fn then_two_days(#[from(draft)] draft: &RefCell<TripDraft>) {
    assert_eq!(draft.borrow().itinerary.days().len(), 2);
}

#[scenario(path = "tests/features/trip_submission.feature", index = 0)]
fn scenario_created(
    draft: RefCell<TripDraft>,
    gateway: RefCell<Option<StubTripGateway>>,
    outcome: RefCell<Option<Result<TripReceipt, SubmitError>>>,
) {
    let _ = (draft, gateway, outcome);
}

#[scenario(path = "tests/features/trip_submission.feature", index = 1)]
fn scenario_invalid(
    draft: RefCell<TripDraft>,
    gateway: RefCell<Option<StubTripGateway>>,
    outcome: RefCell<Option<Result<TripReceipt, SubmitError>>>,
) {
    let _ = (draft, gateway, outcome);
}

#[scenario(path = "tests/features/trip_submission.feature", index = 2)]
fn scenario_rejected(
    draft: RefCell<TripDraft>,
    gateway: RefCell<Option<StubTripGateway>>,
    outcome: RefCell<Option<Result<TripReceipt, SubmitError>>>,
) {
    let _ = (draft, gateway, outcome);
}
