//! Property-based tests for the flood-risk heuristic and value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{GeoLocation, RiskInputs, RiskLevel, evaluate, evaluate_inputs};
use proptest::prelude::*;

const WEATHER: [&str; 16] = [
    "Heavy rain",
    "Moderate rain",
    "Light rain",
    "Overcast clouds",
    "Drizzle",
    "Scattered clouds",
    "Haze",
    "Fog",
    "Mist",
    "Clear",
    "Sunny",
    "Few clouds",
    "Thunderstorm with rain",
    "Snow",
    " Fog ",
    "",
];

fn weather() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(WEATHER.to_vec()).prop_map(|s| s.to_string()),
        "[a-zA-Z ]{0,24}",
    ]
}

// ============================================================================
// Heuristic Property Tests
// ============================================================================

mod heuristic_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_inputs_always_yield_a_verdict(
            precip in 0.0f64..200.0,
            sky in weather(),
            state in 0u8..=2,
            confidence in 0.0f64..=1.0,
            humidity in 0.0f64..=100.0
        ) {
            let verdict = evaluate(precip, &sky, state, confidence, humidity);
            prop_assert!(verdict.is_ok());
            let verdict = verdict.unwrap();
            prop_assert!(RiskLevel::ALL.contains(&verdict.risk_label));
            prop_assert!(!verdict.reason.is_empty());
        }

        #[test]
        fn evaluation_is_deterministic(
            precip in 0.0f64..200.0,
            sky in weather(),
            state in 0u8..=2,
            confidence in 0.0f64..=1.0,
            humidity in 0.0f64..=100.0
        ) {
            let inputs = RiskInputs::new(precip, sky, state, confidence, humidity).unwrap();
            prop_assert_eq!(evaluate_inputs(&inputs), evaluate_inputs(&inputs));
        }

        #[test]
        fn valid_inputs_never_reach_the_fallback(
            precip in 0.0f64..200.0,
            sky in weather(),
            state in 0u8..=2,
            confidence in 0.0f64..=1.0,
            humidity in 0.0f64..=100.0
        ) {
            let verdict = evaluate(precip, &sky, state, confidence, humidity).unwrap();
            prop_assert!(verdict.debug.is_none());
        }

        #[test]
        fn confident_full_blockage_is_always_high(
            precip in 0.0f64..200.0,
            sky in weather(),
            confidence in 0.71f64..=1.0,
            humidity in 0.0f64..=100.0
        ) {
            let verdict = evaluate(precip, &sky, 0, confidence, humidity).unwrap();
            prop_assert_eq!(verdict.risk_label, RiskLevel::High);
        }

        #[test]
        fn clear_drain_is_never_above_low(
            precip in 0.0f64..200.0,
            sky in weather(),
            confidence in 0.0f64..=1.0,
            humidity in 0.0f64..=100.0
        ) {
            let verdict = evaluate(precip, &sky, 1, confidence, humidity).unwrap();
            prop_assert!(verdict.risk_label <= RiskLevel::Low);
        }

        #[test]
        fn out_of_range_confidence_is_rejected(
            confidence in prop_oneof![(-10.0f64..-0.001), (1.001f64..10.0)]
        ) {
            prop_assert!(evaluate(1.0, "Clear", 1, confidence, 50.0).is_err());
        }

        #[test]
        fn unknown_blockage_state_is_rejected(state in 3u8..=255) {
            prop_assert!(evaluate(1.0, "Clear", state, 0.5, 50.0).is_err());
        }

        #[test]
        fn negative_precip_is_rejected(precip in -1000.0f64..-0.001) {
            prop_assert!(evaluate(precip, "Clear", 1, 0.5, 50.0).is_err());
        }
    }
}

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn cache_key_is_stable(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let loc = GeoLocation::new(lat, lon).unwrap();
            prop_assert_eq!(loc.cache_key(), GeoLocation::new(lat, lon).unwrap().cache_key());
        }
    }
}
