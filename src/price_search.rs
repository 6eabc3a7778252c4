//! Sorted price lookup
//!
//! Answers "does this suburb have a listing at exactly this price?" by
//! sorting the suburb's eligible prices into descending order with an
//! insertion sort and running a recursive binary search whose branches are
//! mirrored for that order.
//!
//! The two halves are coupled: `recursive_search` moves left when the probe
//! is smaller than the target, which is only correct for the non-increasing
//! layout `descending_sort` produces. Do not swap either one for an
//! ascending standard-library counterpart on its own.

use crate::dataset::Dataset;
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of a price lookup, with the counts gathered on the way
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLookup {
    pub target_price: f64,
    pub suburb: String,
    /// Listings left after dropping unknown land sizes
    pub eligible_listings: usize,
    /// Prices collected for the suburb (duplicates included)
    pub suburb_prices: usize,
    pub found: bool,
}

/// Sort `values` into non-increasing order in place
///
/// Insertion sort: each element shifts left past neighbours that are
/// strictly smaller, so equal values never cross each other.
pub fn descending_sort<T: PartialOrd + Copy>(values: &mut [T]) {
    for i in 1..values.len() {
        let key = values[i];
        let mut j = i;
        while j > 0 && values[j - 1] < key {
            values[j] = values[j - 1];
            j -= 1;
        }
        values[j] = key;
    }
}

/// Binary search over a non-increasing slice between `low` and `high` (inclusive)
///
/// Equality is exact. Returns false when the interval is empty.
pub fn recursive_search<T: PartialOrd>(values: &[T], low: usize, high: usize, target: &T) -> bool {
    if low > high || high >= values.len() {
        return false;
    }

    let mid = low + (high - low) / 2;
    let probe = &values[mid];

    if probe == target {
        true
    } else if probe < target {
        // Larger values sit at lower indices.
        match mid.checked_sub(1) {
            Some(upper) => recursive_search(values, low, upper, target),
            None => false,
        }
    } else {
        recursive_search(values, mid + 1, high, target)
    }
}

/// Search a whole non-increasing slice
pub fn contains_descending<T: PartialOrd>(values: &[T], target: &T) -> bool {
    match values.len().checked_sub(1) {
        Some(high) => recursive_search(values, 0, high, target),
        None => false,
    }
}

/// Finite prices of the eligible listings in `suburb`, in file order
///
/// A NaN would compare false against everything and pin itself in the
/// insertion sort, so non-finite prices never reach the search.
pub fn suburb_prices(dataset: &Dataset, suburb: &str) -> Vec<f64> {
    dataset
        .eligible()
        .filter(|listing| listing.suburb == suburb)
        .filter_map(|listing| listing.price)
        .filter(|price| price.is_finite())
        .collect()
}

/// Run the lookup and report the intermediate counts
pub fn lookup_price(dataset: &Dataset, target_price: f64, target_suburb: &str) -> PriceLookup {
    let eligible_listings = dataset.eligible().count();
    info!(eligible_listings, "filtered dataset size");

    let mut lookup = PriceLookup {
        target_price,
        suburb: target_suburb.to_string(),
        eligible_listings,
        suburb_prices: 0,
        found: false,
    };

    if !dataset
        .eligible()
        .any(|listing| listing.suburb == target_suburb)
    {
        debug!(suburb = target_suburb, "suburb has no eligible listings");
        return lookup;
    }

    let mut prices = suburb_prices(dataset, target_suburb);
    lookup.suburb_prices = prices.len();
    info!(suburb = target_suburb, prices = prices.len(), "collected suburb prices");

    descending_sort(&mut prices);
    lookup.found = contains_descending(&prices, &target_price);
    info!(target_price, found = lookup.found, "search result");

    lookup
}

/// True when `target_price` is an exact price among the eligible listings of `target_suburb`
///
/// An unknown suburb and an absent price both return false.
pub fn locate_price(dataset: &Dataset, target_price: f64, target_suburb: &str) -> bool {
    lookup_price(dataset, target_price, target_suburb).found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{LandSize, Listing};

    fn suburb_dataset(suburb: &str, prices: &[f64]) -> Dataset {
        Dataset::from_listings(
            prices
                .iter()
                .map(|&p| Listing::new(suburb, Some(p), LandSize::Known(500.0)))
                .collect(),
        )
    }

    #[test]
    fn test_descending_sort_basic() {
        let mut values = vec![850000.0, 900000.0, 881000.0];
        descending_sort(&mut values);
        assert_eq!(values, vec![900000.0, 881000.0, 850000.0]);
    }

    #[test]
    fn test_descending_sort_empty_and_single() {
        let mut empty: Vec<f64> = vec![];
        descending_sort(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![42.0];
        descending_sort(&mut single);
        assert_eq!(single, vec![42.0]);
    }

    #[test]
    fn test_descending_sort_ascending_input() {
        let mut values = vec![1, 2, 3, 4, 5];
        descending_sort(&mut values);
        assert_eq!(values, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_descending_sort_keeps_ties_in_place() {
        // Pairs compared on the first element only via a wrapper.
        #[derive(Debug, Clone, Copy, PartialEq)]
        struct Tagged(i32, char);
        impl PartialOrd for Tagged {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                self.0.partial_cmp(&other.0)
            }
        }

        let mut values = [Tagged(1, 'a'), Tagged(2, 'b'), Tagged(1, 'c'), Tagged(2, 'd')];
        descending_sort(&mut values);
        let tags: String = values.iter().map(|t| t.1).collect();
        assert_eq!(tags, "bdac");
    }

    #[test]
    fn test_recursive_search_finds_every_element() {
        let values = [9.0, 7.0, 7.0, 5.0, 3.0, 1.0];
        for v in &values {
            assert!(contains_descending(&values, v), "missing {}", v);
        }
    }

    #[test]
    fn test_recursive_search_misses_absent() {
        let values = [9.0, 7.0, 5.0, 3.0, 1.0];
        for v in [10.0, 8.0, 6.0, 4.0, 2.0, 0.0] {
            assert!(!contains_descending(&values, &v), "found {}", v);
        }
    }

    #[test]
    fn test_recursive_search_empty_interval() {
        let values = [3.0, 2.0, 1.0];
        assert!(!recursive_search(&values, 2, 1, &2.0));
        assert!(!contains_descending::<f64>(&[], &1.0));
    }

    #[test]
    fn test_recursive_search_out_of_range_high() {
        let values = [3.0, 2.0, 1.0];
        assert!(!recursive_search(&values, 0, 7, &2.0));
    }

    #[test]
    fn test_ascending_search_would_miss() {
        // The same data in ascending order defeats the mirrored branches.
        let ascending = [1.0, 3.0, 5.0, 7.0, 9.0];
        assert!(!contains_descending(&ascending, &9.0));
    }

    #[test]
    fn test_locate_price_found_and_missing() {
        let dataset = suburb_dataset("Clayton", &[900000.0, 850000.0, 881000.0]);
        assert!(locate_price(&dataset, 881000.0, "Clayton"));
        assert!(!locate_price(&dataset, 875000.0, "Clayton"));
    }

    #[test]
    fn test_locate_price_unknown_suburb() {
        let dataset = suburb_dataset("Clayton", &[900000.0]);
        let lookup = lookup_price(&dataset, 900000.0, "Atlantis");
        assert!(!lookup.found);
        assert_eq!(lookup.suburb_prices, 0);
        assert_eq!(lookup.eligible_listings, 1);
    }

    #[test]
    fn test_locate_price_excludes_unknown_land_size() {
        let dataset = Dataset::from_listings(vec![
            Listing::new("Clayton", Some(881000.0), LandSize::Unknown),
            Listing::new("Clayton", Some(900000.0), LandSize::Known(600.0)),
        ]);
        assert!(!locate_price(&dataset, 881000.0, "Clayton"));
        assert!(locate_price(&dataset, 900000.0, "Clayton"));
    }

    #[test]
    fn test_locate_price_suburb_only_unknown_land() {
        let dataset = Dataset::from_listings(vec![Listing::new(
            "Kew",
            Some(1.0),
            LandSize::Unknown,
        )]);
        let lookup = lookup_price(&dataset, 1.0, "Kew");
        assert!(!lookup.found);
        assert_eq!(lookup.eligible_listings, 0);
    }

    #[test]
    fn test_locate_price_duplicates() {
        let dataset = suburb_dataset("Clayton", &[700000.0, 700000.0, 650000.0]);
        let lookup = lookup_price(&dataset, 700000.0, "Clayton");
        assert!(lookup.found);
        assert_eq!(lookup.suburb_prices, 3);
    }

    #[test]
    fn test_locate_price_skips_missing_prices() {
        let dataset = Dataset::from_listings(vec![
            Listing::new("Clayton", None, LandSize::Known(300.0)),
            Listing::new("Clayton", Some(500000.0), LandSize::Known(300.0)),
        ]);
        let lookup = lookup_price(&dataset, 500000.0, "Clayton");
        assert!(lookup.found);
        assert_eq!(lookup.suburb_prices, 1);
    }

    #[test]
    fn test_locate_price_is_exact() {
        let dataset = suburb_dataset("Clayton", &[881000.0]);
        assert!(!locate_price(&dataset, 881000.0001, "Clayton"));
    }

    #[test]
    fn test_locate_price_nan_cell_between_prices() {
        let data = "\
suburb,price,land_size
Clayton,881000,500
Clayton,NaN,500
Clayton,900000,500
";
        let dataset = Dataset::from_reader(data.as_bytes()).unwrap();
        let lookup = lookup_price(&dataset, 881000.0, "Clayton");
        assert!(lookup.found);
        assert_eq!(lookup.suburb_prices, 2);
        assert!(locate_price(&dataset, 900000.0, "Clayton"));
    }

    #[test]
    fn test_suburb_prices_drop_non_finite() {
        let dataset = suburb_dataset("Clayton", &[881000.0, f64::NAN, 900000.0, f64::INFINITY]);
        let mut prices = suburb_prices(&dataset, "Clayton");
        assert_eq!(prices, vec![881000.0, 900000.0]);

        descending_sort(&mut prices);
        assert_eq!(prices, vec![900000.0, 881000.0]);
        assert!(locate_price(&dataset, 881000.0, "Clayton"));
    }
}
