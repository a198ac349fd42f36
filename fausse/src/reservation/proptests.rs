//! Property-based tests for request validation.

use super::request::ReservationRequest;
use crate::config::BookingPolicy;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 5, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

// Slots inside the default service hours, 17:00 to 23:00 every 30 minutes
fn slot_time_strategy() -> impl Strategy<Value = String> {
    (0u32..=12).prop_map(|step| {
        let minutes = 17 * 60 + step * 30;
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    })
}

fn future_date_strategy() -> impl Strategy<Value = String> {
    (0i64..365).prop_map(|offset| {
        (now().date() + chrono::TimeDelta::days(offset))
            .format("%Y-%m-%d")
            .to_string()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Well-formed requests always validate and keep their values
    #[test]
    fn valid_requests_are_accepted(
        name in "[A-Za-z]{1,20}( [A-Za-z]{1,20})?",
        user in "[a-z]{1,12}",
        party in 1i64..=40,
        date in future_date_strategy(),
        time in slot_time_strategy(),
    ) {
        let email = format!("{user}@example.com");
        let request = ReservationRequest::new(name.clone(), email.to_uppercase(), party, date.clone(), time.clone());
        let draft = request.validate(&BookingPolicy::default(), now()).unwrap();

        prop_assert_eq!(draft.name(), name.as_str());
        prop_assert_eq!(draft.email(), email.as_str());
        prop_assert_eq!(i64::from(draft.party_size().value()), party);
        prop_assert_eq!(draft.slot().to_string(), format!("{date} {time}"));
    }

    // Non-positive party sizes are always rejected on the party_size field
    #[test]
    fn non_positive_party_rejected(party in -1000i64..=0) {
        let request = ReservationRequest::new("Zoe Park", "zoe@example.com", party, "2030-05-02", "19:00");
        let errors = request.validate(&BookingPolicy::default(), now()).unwrap_err();
        prop_assert_eq!(errors.len(), 1);
        prop_assert!(errors.contains("party_size"));
    }

    // Any date before today is reported on the date field
    #[test]
    fn past_dates_rejected(days_ago in 1i64..2000) {
        let date = (now().date() - chrono::TimeDelta::days(days_ago)).format("%Y-%m-%d").to_string();
        let request = ReservationRequest::new("Zoe Park", "zoe@example.com", 2, date, "19:00");
        let errors = request.validate(&BookingPolicy::default(), now()).unwrap_err();
        prop_assert!(errors.contains("date"));
        prop_assert!(!errors.contains("time"));
    }

    // Strings without an @ never pass as emails
    #[test]
    fn emails_without_at_rejected(local in "[a-z0-9.]{1,30}") {
        let request = ReservationRequest::new("Zoe Park", local, 2, "2030-05-02", "19:00");
        let errors = request.validate(&BookingPolicy::default(), now()).unwrap_err();
        prop_assert!(errors.contains("email"));
    }
}
