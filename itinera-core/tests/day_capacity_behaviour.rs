//! Behavioural tests for the per-day capacity rule.

use itinera_core::{CapacityExceeded, Day, PoiId, TimeOfDay, Visit, VisitDuration};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::collections::HashMap;

type Durations = HashMap<PoiId, VisitDuration>;

fn durations() -> Durations {
    HashMap::from([
        (1, VisitDuration::from_minutes(120)),
        (2, VisitDuration::from_minutes(300)),
        (3, VisitDuration::from_minutes(120)),
        (4, VisitDuration::from_minutes(121)),
    ])
}

#[fixture]
fn day() -> RefCell<Day> {
    RefCell::new(Day::new(1))
}

#[fixture]
fn outcome() -> RefCell<Option<Result<Visit, CapacityExceeded>>> {
    RefCell::new(None)
}

#[given("a default day from 09:00 to 18:00")]
fn given_default_day(#[from(day)] day: &RefCell<Day>) {
    *day.borrow_mut() = Day::new(1);
    let day = day.borrow();
    assert_eq!(day.start_time(), TimeOfDay::DAY_START);
    assert_eq!(day.end_time(), TimeOfDay::DAY_END);
}

#[given("visits of 120 and 300 minutes are already scheduled")]
fn given_scheduled_visits(#[from(day)] day: &RefCell<Day>) {
    let lookup = durations();
    let mut day = day.borrow_mut();
    day.add_visit(1, &lookup).expect("first visit fits");
    day.add_visit(2, &lookup).expect("second visit fits");
}

#[when("I add a visit of 120 minutes")]
fn when_add_exact(
    #[from(day)] day: &RefCell<Day>,
    #[from(outcome)] outcome: &RefCell<Option<Result<Visit, CapacityExceeded>>>,
) {
    *outcome.borrow_mut() = Some(day.borrow_mut().add_visit(3, &durations()));
}

#[when("I add a visit of 121 minutes")]
fn when_add_overlong(
    #[from(day)] day: &RefCell<Day>,
    #[from(outcome)] outcome: &RefCell<Option<Result<Visit, CapacityExceeded>>>,
) {
    *outcome.borrow_mut() = Some(day.borrow_mut().add_visit(4, &durations()));
}

#[when("I remove the first visit")]
fn when_remove_first(#[from(day)] day: &RefCell<Day>) {
    let removed = day.borrow_mut().remove_visit(0);
    assert_eq!(removed.map(|v| v.poi_id), Some(1));
}

#[then("the visit is scheduled as number 3")]
fn then_scheduled_third(
    #[from(outcome)] outcome: &RefCell<Option<Result<Visit, CapacityExceeded>>>,
) {
    let outcome = outcome.borrow();
    let visit = outcome
        .as_ref()
        .expect("visit attempted")
        .as_ref()
        .expect("visit accepted");
    assert_eq!(visit.visit_order, 3);
}

#[then("no time remains in the day")]
fn then_day_full(#[from(day)] day: &RefCell<Day>) {
    assert_eq!(day.borrow().usage(&durations()).remaining_minutes, 0);
}

#[then("the visit is rejected with 120 minutes remaining")]
fn then_rejected(#[from(outcome)] outcome: &RefCell<Option<Result<Visit, CapacityExceeded>>>) {
    let outcome = outcome.borrow();
    let err = outcome
        .as_ref()
        .expect("visit attempted")
        .as_ref()
        .expect_err("visit rejected");
    assert_eq!(err.remaining_minutes, 120);
    assert_eq!(err.required_minutes, 121);
}

#[then("the day still holds 2 visits")]
fn then_two_visits(#[from(day)] day: &RefCell<Day>) {
    assert_eq!(day.borrow().visits().len(), 2);
}

#[then("the visit orders are 1 and 2")]
fn then_dense_orders(#[from(day)] day: &RefCell<Day>) {
    let orders: Vec<(PoiId, u32)> = day
        .borrow()
        .visits()
        .iter()
        .map(|v| (v.poi_id, v.visit_order))
        .collect();
    assert_eq!(orders, vec![(2, 1), (3, 2)]);
}

#[scenario(path = "tests/features/day_capacity.feature", index = 0)]
fn scenario_exact_fit(
    day: RefCell<Day>,
    outcome: RefCell<Option<Result<Visit, CapacityExceeded>>>,
) {
    let _ = (day, outcome);
}

#[scenario(path = "tests/features/day_capacity.feature", index = 1)]
fn scenario_overrun(
    day: RefCell<Day>,
    outcome: RefCell<Option<Result<Visit, CapacityExceeded>>>,
) {
    let _ = (day, outcome);
}

#[scenario(path = "tests/features/day_capacity.feature", index = 2)]
fn scenario_removal(
    day: RefCell<Day>,
    outcome: RefCell<Option<Result<Visit, CapacityExceeded>>>,
) {
    let _ = (day, outcome);
}
