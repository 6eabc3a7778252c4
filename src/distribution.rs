//! Property value distribution (price histogram in a target currency)

use crate::currency::{CurrencyTable, ResolvedRate};
use crate::dataset::Dataset;
use crate::stats::is_all;
use serde::Serialize;
use tracing::debug;

/// Prices are reported in millions of the target currency
pub const PRICE_SCALE: f64 = 1_000_000.0;

/// One histogram bin, `[lower, upper)` except the last which is closed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// Bin `values` into `bin_count` equal-width bins spanning min..=max
    ///
    /// Non-finite values are skipped. No values gives no bins; a single
    /// distinct value gives one bin of width one centred on it.
    pub fn from_values(values: &[f64], bin_count: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bin_count == 0 {
            return Self { bins: Vec::new() };
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Self {
                bins: vec![Bin {
                    lower: min - 0.5,
                    upper: max + 0.5,
                    count: finite.len(),
                }],
            };
        }

        let width = (max - min) / bin_count as f64;
        let mut bins: Vec<Bin> = (0..bin_count)
            .map(|i| Bin {
                lower: min + width * i as f64,
                upper: if i + 1 == bin_count {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for value in finite {
            let index = (((value - min) / width) as usize).min(bin_count - 1);
            bins[index].count += 1;
        }

        Self { bins }
    }

    /// Total number of binned values
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Largest bin count
    pub fn peak(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Converted prices and their histogram for one suburb/currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueDistribution {
    pub suburb: String,
    pub rate: ResolvedRate,
    /// Prices in millions of the target currency
    pub values: Vec<f64>,
    pub histogram: Histogram,
}

impl ValueDistribution {
    /// File name for the chart, e.g. `Clayton_property_value_distribution_USD.svg`
    ///
    /// Path separators and other characters outside `[A-Za-z0-9 _-]` in the
    /// suburb and currency become `_`, so the file always lands directly in
    /// the output directory.
    pub fn chart_file_name(&self) -> String {
        format!(
            "{}_property_value_distribution_{}.svg",
            file_name_component(&self.suburb),
            file_name_component(&self.rate.currency)
        )
    }
}

fn file_name_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the value distribution for `suburb` (or `all`) in `currency`
pub fn value_distribution(
    dataset: &Dataset,
    suburb: &str,
    currency: &str,
    table: &CurrencyTable,
    bin_count: usize,
) -> ValueDistribution {
    let rate = table.resolve(currency);

    let values: Vec<f64> = dataset
        .listings()
        .iter()
        .filter(|l| is_all(suburb) || l.suburb == suburb)
        .filter_map(|l| l.price)
        .map(|price| price * rate.rate / PRICE_SCALE)
        .collect();

    debug!(
        suburb,
        currency = %rate.currency,
        rate = rate.rate,
        values = values.len(),
        "value distribution"
    );

    let histogram = Histogram::from_values(&values, bin_count);
    ValueDistribution {
        suburb: suburb.to_string(),
        rate,
        values,
        histogram,
    }
}
