//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::policy::BookingPolicy;
use super::schema::{Config, RestaurantConfig, SeatingConfig, ServiceHoursConfig};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn restaurant_strategy() -> impl Strategy<Value = RestaurantConfig> {
    (prop::option::of(1u32..=500), prop::option::of(0u32..=100))
        .prop_map(|(seats, tables)| RestaurantConfig { seats, tables })
}

fn seating_strategy() -> impl Strategy<Value = SeatingConfig> {
    (prop::option::of(1u32..=240), prop::option::of(1u32..=120)).prop_map(
        |(duration_minutes, slot_interval_minutes)| SeatingConfig {
            duration_minutes,
            slot_interval_minutes,
        },
    )
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(restaurant_strategy()),
        prop::option::of(seating_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(1u64..=60),
    )
        .prop_map(|(restaurant, seating, autoinit, lock_wait)| Config {
            restaurant,
            seating,
            disable_autoinit: autoinit,
            maximum_lock_wait_seconds: lock_wait,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // A set value in the higher layer always wins; an unset one never erases
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        let pick = |h: Option<u32>, l: Option<u32>| h.or(l);
        let seats = |c: &Config| c.restaurant.as_ref().and_then(|r| r.seats);
        let duration = |c: &Config| c.seating.as_ref().and_then(|s| s.duration_minutes);

        prop_assert_eq!(seats(&result), pick(seats(&high), seats(&low)));
        prop_assert_eq!(duration(&result), pick(duration(&high), duration(&low)));
        prop_assert_eq!(
            result.disable_autoinit,
            high.disable_autoinit.or(low.disable_autoinit)
        );
        prop_assert_eq!(
            result.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Merging is associative
    #[test]
    fn config_merge_associative(a in config_strategy(), b in config_strategy(), c in config_strategy()) {
        let mut left = a.clone();
        ConfigMerger::merge_into(&mut left, &b);
        ConfigMerger::merge_into(&mut left, &c);

        let mut b_merge_c = b;
        ConfigMerger::merge_into(&mut b_merge_c, &c);
        let mut right = a;
        ConfigMerger::merge_into(&mut right, &b_merge_c);

        prop_assert_eq!(left, right);
    }

    // Every interval that divides the window yields a policy whose slots all
    // sit on boundaries inside service hours
    #[test]
    fn valid_hours_produce_consistent_slots(
        open_hour in 10u32..=20,
        interval in prop::sample::select(vec![10u32, 15, 20, 30, 60]),
        steps in 0u32..=12,
    ) {
        let open_minutes = open_hour * 60;
        let last_minutes = (open_minutes + interval * steps).min(23 * 60 + 59);
        prop_assume!((last_minutes - open_minutes) % interval == 0);

        let config = Config {
            seating: Some(SeatingConfig { duration_minutes: None, slot_interval_minutes: Some(interval) }),
            service_hours: Some(ServiceHoursConfig {
                open: Some(format!("{:02}:{:02}", open_minutes / 60, open_minutes % 60)),
                last_seating: Some(format!("{:02}:{:02}", last_minutes / 60, last_minutes % 60)),
            }),
            ..Default::default()
        };
        prop_assert!(ConfigValidator::validate(&config).is_ok());

        let policy = BookingPolicy::from_config(&config).unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        let slots = policy.slots_on(date);
        prop_assert_eq!(slots.len(), ((last_minutes - open_minutes) / interval + 1) as usize);
        for slot in slots {
            prop_assert!(policy.is_within_service_hours(slot.time()));
            prop_assert!(policy.is_slot_boundary(slot.time()));
        }
    }
}
