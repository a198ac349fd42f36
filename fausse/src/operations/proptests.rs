//! Property-based tests for operations module.
//!
//! These tests focus on the plan-execute pattern and operation invariants.

use super::executor::PlanExecutor;
use super::plan::PlanAction;
use super::reserve::{ReserveOptions, ReservePlan};
use crate::availability::AvailabilityChecker;
use crate::config::BookingPolicy;
use crate::database::Database;
use crate::reservation::request::ReservationRequest;
use chrono::NaiveDate;
use proptest::prelude::*;

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 5, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn time_strategy() -> impl Strategy<Value = String> {
    (17u32..=23, prop::sample::select(vec![0u32, 30]))
        .prop_filter("last seating is 23:00", |(h, m)| *h < 23 || *m == 0)
        .prop_map(|(h, m)| format!("{h:02}:{m:02}"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // A valid request always plans exactly one booking, followed by a
    // subscription only when one was asked for
    #[test]
    fn plan_shape_follows_request(
        party in 1i64..=8,
        time in time_strategy(),
        signup in any::<bool>(),
    ) {
        let db = Database::open_in_memory().unwrap();
        let policy = BookingPolicy::default();
        let request = ReservationRequest::new("Diego Romero", "diego@example.com", party, "2030-06-01", time)
            .with_newsletter_signup(signup);

        let plan = ReservePlan::new(ReserveOptions::new(request, now()), &policy)
            .build_plan(db.connection())
            .unwrap();

        prop_assert!(matches!(plan.actions[0], PlanAction::CreateReservation(_)));
        prop_assert_eq!(plan.len(), if signup { 2 } else { 1 });
    }

    // Dry runs never write, whatever the plan
    #[test]
    fn dry_run_never_writes(party in 1i64..=8, time in time_strategy(), signup in any::<bool>()) {
        let mut db = Database::open_in_memory().unwrap();
        let policy = BookingPolicy::default();
        let checker = AvailabilityChecker::new(policy.clone());
        let request = ReservationRequest::new("Diego Romero", "diego@example.com", party, "2030-06-01", time)
            .with_newsletter_signup(signup);

        let plan = ReservePlan::new(ReserveOptions::new(request, now()), &policy)
            .build_plan(db.connection())
            .unwrap();
        let result = PlanExecutor::new(&mut db, &checker).dry_run().execute(&plan).unwrap();

        prop_assert!(result.reservation.is_none());
        prop_assert!(Database::list_all_reservations(db.connection()).unwrap().is_empty());
        prop_assert!(Database::get_subscriber(db.connection(), "diego@example.com").unwrap().is_none());
    }
}
