//! Property-based tests for intersection search and validation.

use proptest::prelude::*;

use curvecross::equation::{ValidationError, validate};
use curvecross::intersection::{DEFAULT_TOLERANCE, find_intersections};

// Small values on a coarse lattice so exact equality and sign changes both occur
fn sample_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => (-4i32..=4).prop_map(|v| v as f64 * 0.5),
        1 => Just(f64::NAN),
    ]
}

fn curves() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
    (0usize..40).prop_flat_map(|n| {
        (
            Just((0..n).map(|i| i as f64).collect::<Vec<_>>()),
            proptest::collection::vec(sample_value(), n),
            proptest::collection::vec(sample_value(), n),
        )
    })
}

fn outside_whitelist() -> impl Strategy<Value = char> {
    proptest::sample::select("abcdefhijkmnpuvwyz!@#$%&=_;:,<>?'[]{}|~".chars().collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn find_is_idempotent((xs, y1, y2) in curves()) {
        let first = find_intersections(&xs, &y1, &y2, DEFAULT_TOLERANCE);
        let second = find_intersections(&xs, &y1, &y2, DEFAULT_TOLERANCE);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn find_never_reports_at_undefined_samples((xs, y1, y2) in curves()) {
        let found = find_intersections(&xs, &y1, &y2, DEFAULT_TOLERANCE);
        let reported = found
            .points
            .iter()
            .copied()
            .chain(found.intervals.iter().flat_map(|i| [i.start, i.end]));

        for point in reported {
            prop_assert!(!point.y.is_nan());
            // Grid positions are integers; midpoints fall between two of them
            if point.x.fract() == 0.0 {
                let i = point.x as usize;
                prop_assert!(!y1[i].is_nan() && !y2[i].is_nan());
            }
        }
    }

    #[test]
    fn intervals_span_at_least_three_samples((xs, y1, y2) in curves()) {
        let found = find_intersections(&xs, &y1, &y2, DEFAULT_TOLERANCE);
        for interval in found.intervals {
            prop_assert!(interval.end.x - interval.start.x >= 2.0);
        }
    }

    #[test]
    fn validation_rejects_unknown_characters(c in outside_whitelist(), at in 0usize..=5) {
        let mut text = String::from("x + 1");
        text.insert(at, c);
        prop_assert_eq!(validate(&text), Err(ValidationError::InvalidCharacters(c)));
    }
}
