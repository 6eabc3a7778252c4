//! Sales trend: sold listings per year

use crate::dataset::Dataset;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Sold-date format in the source data
pub const SOLD_DATE_FORMAT: &str = "%d/%m/%Y";

/// Direction of a year-to-year segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Sales held or increased
    Rise,
    /// Sales dropped
    Dip,
}

/// Line segment between two consecutive years
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSegment {
    pub from_year: i32,
    pub to_year: i32,
    pub from_count: usize,
    pub to_count: usize,
    pub direction: Direction,
}

/// Yearly sales counts in ascending year order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesTrend {
    pub yearly_sales: Vec<(i32, usize)>,
    /// Listings skipped for a missing or unparsable sold date
    pub skipped: usize,
}

impl SalesTrend {
    /// Segments between consecutive years present in the data
    pub fn segments(&self) -> Vec<TrendSegment> {
        self.yearly_sales
            .windows(2)
            .map(|pair| {
                let (from_year, from_count) = pair[0];
                let (to_year, to_count) = pair[1];
                TrendSegment {
                    from_year,
                    to_year,
                    from_count,
                    to_count,
                    direction: if to_count >= from_count {
                        Direction::Rise
                    } else {
                        Direction::Dip
                    },
                }
            })
            .collect()
    }
}

/// Parse a `dd/mm/yyyy` sold date
pub fn parse_sold_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), SOLD_DATE_FORMAT).ok()
}

/// Count eligible listings sold per year
///
/// Listings with an unknown land size are excluded, as are listings whose
/// sold date is missing or malformed.
pub fn sales_trend(dataset: &Dataset) -> SalesTrend {
    let mut per_year: BTreeMap<i32, usize> = BTreeMap::new();
    let mut skipped = 0;

    for listing in dataset.eligible() {
        match listing.sold_date.as_deref().and_then(parse_sold_date) {
            Some(date) => *per_year.entry(date.year()).or_insert(0) += 1,
            None => skipped += 1,
        }
    }

    debug!(years = per_year.len(), skipped, "sales trend");
    SalesTrend {
        yearly_sales: per_year.into_iter().collect(),
        skipped,
    }
}
