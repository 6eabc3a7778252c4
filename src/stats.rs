//! Descriptive statistics over listing columns
//!
//! Room-count means, deviations and extrema go through Trueno's SIMD
//! `Vector` in `f32`; the median is taken from a sorted copy. Land-size
//! averages are summed in `f64` so large plots keep two exact decimals.

use crate::dataset::Dataset;
use crate::error::{AnalyzerError, Result};
use crate::listing::Listing;
use serde::Serialize;
use tracing::debug;

/// Scope keyword selecting every suburb
pub const ALL_SUBURBS: &str = "all";

/// True when `suburb` is the `all` keyword (any case)
pub fn is_all(suburb: &str) -> bool {
    suburb.trim().eq_ignore_ascii_case(ALL_SUBURBS)
}

/// Statistics for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f32,
    /// Sample standard deviation (n - 1); `None` below two values
    pub std_dev: Option<f32>,
    pub median: f32,
    pub min: f32,
    pub max: f32,
}

impl ColumnSummary {
    /// Summarize `values`; `None` when empty
    pub fn from_values(column: &str, values: &[f32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let v = trueno::Vector::from_slice(values);
        let n = values.len();

        let mean = v.mean().unwrap_or(0.0);
        let min = v.min().unwrap_or(0.0);
        let max = v.max().unwrap_or(0.0);

        // Trueno's stddev divides by n; rescale to the sample estimate.
        let std_dev = if n > 1 {
            let population = v.stddev().unwrap_or(0.0);
            Some(population * (n as f32 / (n - 1) as f32).sqrt())
        } else {
            None
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = percentile(&sorted, 50.0);

        Some(Self {
            column: column.to_string(),
            count: n,
            mean,
            std_dev,
            median,
            min,
            max,
        })
    }
}

/// Linear-interpolated percentile of ascending `sorted_data`
fn percentile(sorted_data: &[f32], percentile: f32) -> f32 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f32;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f32;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Room statistics for a suburb (or all suburbs)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySummary {
    pub suburb: String,
    pub listings: usize,
    pub columns: Vec<ColumnSummary>,
}

const ROOM_COLUMNS: [&str; 3] = ["bedrooms", "bathrooms", "parking_spaces"];

fn room_count(listing: &Listing, column: &str) -> Option<f64> {
    match column {
        "bedrooms" => listing.bedrooms,
        "bathrooms" => listing.bathrooms,
        "parking_spaces" => listing.parking_spaces,
        _ => None,
    }
}

/// Summarize bedrooms, bathrooms and parking spaces
///
/// Only listings with all three counts present are used. Returns `None`
/// when nothing survives the filter.
pub fn property_summary(dataset: &Dataset, suburb: &str) -> Option<PropertySummary> {
    let selected: Vec<&Listing> = dataset
        .listings()
        .iter()
        .filter(|l| l.bedrooms.is_some() && l.bathrooms.is_some() && l.parking_spaces.is_some())
        .filter(|l| is_all(suburb) || l.suburb == suburb)
        .collect();

    debug!(suburb, listings = selected.len(), "property summary selection");
    if selected.is_empty() {
        return None;
    }

    let columns = ROOM_COLUMNS
        .iter()
        .filter_map(|name| {
            let values: Vec<f32> = selected
                .iter()
                .filter_map(|l| room_count(l, name))
                .map(|v| v as f32)
                .collect();
            ColumnSummary::from_values(name, &values)
        })
        .collect();

    Some(PropertySummary {
        suburb: suburb.to_string(),
        listings: selected.len(),
        columns,
    })
}

/// Mean land size for a suburb (or all suburbs)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandSizeAverage {
    pub suburb: String,
    pub listings: usize,
    pub mean_square_metres: f64,
}

/// Average land size in m²
///
/// Uses listings with a known land size and a unit; hectares are scaled to
/// m². A named suburb with no such listing is an error.
pub fn average_land_size(dataset: &Dataset, suburb: &str) -> Result<LandSizeAverage> {
    let measured = dataset
        .listings()
        .iter()
        .filter(|l| is_all(suburb) || l.suburb == suburb)
        .filter_map(|l| {
            let unit = l.land_size_unit.as_deref()?;
            l.land_size.square_metres(Some(unit))
        })
        .collect::<Vec<f64>>();

    if measured.is_empty() {
        return Err(if is_all(suburb) {
            AnalyzerError::EmptyDataset("no listings with a land size".to_string())
        } else {
            AnalyzerError::UnknownSuburb(suburb.to_string())
        });
    }

    let mean = measured.iter().sum::<f64>() / measured.len() as f64;
    debug!(suburb, listings = measured.len(), mean, "average land size");

    Ok(LandSizeAverage {
        suburb: suburb.to_string(),
        listings: measured.len(),
        mean_square_metres: mean,
    })
}
