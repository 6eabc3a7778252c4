//! Listing records as read from the property CSV
//!
//! One `Listing` per CSV row. Only the columns the analyses use are kept;
//! extra columns in the file are ignored by the deserializer.

use serde::{Deserialize, Deserializer, Serialize};

/// Land size of a listing
///
/// The source data marks a missing measurement with an empty cell or `-1`.
/// Both collapse into `Unknown`, so callers never compare against raw
/// sentinel values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum LandSize {
    /// Measured land size in the listing's own unit
    Known(f64),
    /// Empty cell, `-1`, or anything that does not parse as a number
    #[default]
    Unknown,
}

impl LandSize {
    /// Parse a raw CSV cell into a land size
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value == -1.0 || value.is_nan() => LandSize::Unknown,
            Ok(value) => LandSize::Known(value),
            Err(_) => LandSize::Unknown,
        }
    }

    /// True for the unknown-sentinel
    pub fn is_unknown(&self) -> bool {
        matches!(self, LandSize::Unknown)
    }

    /// Measured value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            LandSize::Known(value) => Some(*value),
            LandSize::Unknown => None,
        }
    }

    /// Land size in square metres (`ha` is scaled by 10 000)
    pub fn square_metres(&self, unit: Option<&str>) -> Option<f64> {
        let value = self.value()?;
        match unit {
            Some(unit) if unit.trim().eq_ignore_ascii_case("ha") => Some(value * 10_000.0),
            _ => Some(value),
        }
    }
}

impl<'de> Deserialize<'de> for LandSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or(LandSize::Unknown, |raw| LandSize::parse(&raw)))
    }
}

/// Numeric cell where blanks, junk and non-finite values (`NaN`, `inf`) are `None`
fn finite_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = csv::invalid_option(deserializer)?;
    Ok(value.filter(|v| v.is_finite()))
}

/// A single property listing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Listing {
    pub suburb: String,
    #[serde(default, deserialize_with = "finite_number")]
    pub price: Option<f64>,
    #[serde(default)]
    pub land_size: LandSize,
    #[serde(default)]
    pub land_size_unit: Option<String>,
    #[serde(default, deserialize_with = "finite_number")]
    pub bedrooms: Option<f64>,
    #[serde(default, deserialize_with = "finite_number")]
    pub bathrooms: Option<f64>,
    #[serde(default, deserialize_with = "finite_number")]
    pub parking_spaces: Option<f64>,
    #[serde(default)]
    pub sold_date: Option<String>,
}

impl Listing {
    /// Create a listing with only the fields used by price lookup
    pub fn new(suburb: impl Into<String>, price: Option<f64>, land_size: LandSize) -> Self {
        Self {
            suburb: suburb.into(),
            price,
            land_size,
            ..Self::default()
        }
    }

    /// Set the room counts
    pub fn with_rooms(mut self, bedrooms: f64, bathrooms: f64, parking_spaces: f64) -> Self {
        self.bedrooms = Some(bedrooms);
        self.bathrooms = Some(bathrooms);
        self.parking_spaces = Some(parking_spaces);
        self
    }

    /// Set the land size unit (e.g. `m²` or `ha`)
    pub fn with_land_unit(mut self, unit: impl Into<String>) -> Self {
        self.land_size_unit = Some(unit.into());
        self
    }

    /// Set the sold date (`dd/mm/yyyy`)
    pub fn with_sold_date(mut self, sold_date: impl Into<String>) -> Self {
        self.sold_date = Some(sold_date.into());
        self
    }

    /// Eligible listings are those with a measured land size
    pub fn is_eligible(&self) -> bool {
        !self.land_size.is_unknown()
    }
}
