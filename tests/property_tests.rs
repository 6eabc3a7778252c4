//! Property-based tests for the sorted price lookup
//!
//! The sort and the mirrored binary search are only correct together, so
//! the properties here exercise them as a pair as well as separately.

use proptest::prelude::*;
use propscan::dataset::Dataset;
use propscan::listing::{LandSize, Listing};
use propscan::price_search::{contains_descending, descending_sort, locate_price};

fn is_non_increasing(values: &[i64]) -> bool {
    values.windows(2).all(|w| w[0] >= w[1])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_sort_is_non_increasing_permutation(mut values in prop::collection::vec(-1000i64..1000, 0..60)) {
        let mut expected = values.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));

        descending_sort(&mut values);

        prop_assert!(is_non_increasing(&values));
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn prop_sort_leaves_sorted_input_unchanged(mut values in prop::collection::vec(-1000i64..1000, 0..60)) {
        values.sort_unstable_by(|a, b| b.cmp(a));
        let before = values.clone();

        descending_sort(&mut values);

        prop_assert_eq!(values, before);
    }

    #[test]
    fn prop_search_finds_every_member(mut values in prop::collection::vec(-500i64..500, 1..60)) {
        descending_sort(&mut values);
        for v in &values {
            prop_assert!(contains_descending(&values, v));
        }
    }

    #[test]
    fn prop_search_rejects_non_members(
        mut values in prop::collection::vec(-500i64..500, 0..60),
        target in -600i64..600,
    ) {
        descending_sort(&mut values);
        let expected = values.contains(&target);
        prop_assert_eq!(contains_descending(&values, &target), expected);
    }

    #[test]
    fn prop_sort_then_search_on_prices(
        prices in prop::collection::vec(100_000u32..2_000_000, 0..40),
        target in 100_000u32..2_000_000,
    ) {
        let mut sorted: Vec<f64> = prices.iter().map(|&p| p as f64).collect();
        descending_sort(&mut sorted);
        let expected = prices.contains(&target);
        prop_assert_eq!(contains_descending(&sorted, &(target as f64)), expected);
    }

    #[test]
    fn prop_locate_price_matches_eligible_membership(
        rows in prop::collection::vec((0u8..3, 1u32..50, any::<bool>()), 0..40),
        target in 1u32..50,
    ) {
        let suburbs = ["Clayton", "Kew", "Carlton"];
        let listings: Vec<Listing> = rows
            .iter()
            .map(|&(s, price, known)| {
                let land = if known { LandSize::Known(400.0) } else { LandSize::Unknown };
                Listing::new(suburbs[s as usize], Some(price as f64 * 10_000.0), land)
            })
            .collect();
        let dataset = Dataset::from_listings(listings);

        let expected = rows
            .iter()
            .any(|&(s, price, known)| s == 0 && known && price == target);
        prop_assert_eq!(
            locate_price(&dataset, target as f64 * 10_000.0, "Clayton"),
            expected
        );
    }
}

#[test]
fn test_documented_clayton_example() {
    let dataset = Dataset::from_listings(
        [900000.0, 850000.0, 881000.0]
            .iter()
            .map(|&p| Listing::new("Clayton", Some(p), LandSize::Known(500.0)))
            .collect(),
    );
    assert!(locate_price(&dataset, 881000.0, "Clayton"));
    assert!(!locate_price(&dataset, 875000.0, "Clayton"));
    assert!(!locate_price(&dataset, 881000.0, "Nowhere"));
}

#[test]
fn test_duplicate_prices_found() {
    let dataset = Dataset::from_listings(
        [700000.0, 700000.0, 650000.0]
            .iter()
            .map(|&p| Listing::new("Clayton", Some(p), LandSize::Known(500.0)))
            .collect(),
    );
    assert!(locate_price(&dataset, 700000.0, "Clayton"));
}
