//! Immutable listing table loaded from a CSV file
//!
//! Loading produces a `Dataset` that is never mutated afterwards. Currency
//! conversion derives a new `Dataset` instead of rewriting prices in place.

use crate::error::{AnalyzerError, Result};
use crate::listing::Listing;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Table of listings plus the file it came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    listings: Vec<Listing>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Build a dataset from already-parsed listings
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            source: None,
        }
    }

    /// Load listings from a CSV file with a header row
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut dataset = Self::from_reader(file)?;
        dataset.source = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            rows = dataset.len(),
            "loaded listing dataset"
        );
        Ok(dataset)
    }

    /// Load listings from any CSV reader with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut listings = Vec::new();
        for record in reader.deserialize::<Listing>() {
            listings.push(record?);
        }
        debug!(rows = listings.len(), "parsed CSV records");

        Ok(Self::from_listings(listings))
    }

    /// All listings in file order
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Path the dataset was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Listings whose land size is not the unknown-sentinel
    pub fn eligible(&self) -> impl Iterator<Item = &Listing> {
        self.listings.iter().filter(|listing| listing.is_eligible())
    }

    /// Derive a new dataset with every price multiplied by `rate`
    pub fn with_exchange_rate(&self, rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(AnalyzerError::InvalidRate(rate));
        }

        let listings = self
            .listings
            .iter()
            .map(|listing| Listing {
                price: listing.price.map(|price| price * rate),
                ..listing.clone()
            })
            .collect();

        debug!(rate, rows = self.len(), "derived exchanged dataset");
        Ok(Self {
            listings,
            source: self.source.clone(),
        })
    }

    /// Prices rendered as `$<value>`, `$nan` where the price is missing
    pub fn formatted_prices(&self) -> Vec<String> {
        self.listings
            .iter()
            .map(|listing| format_price(listing.price))
            .collect()
    }
}

/// Render a price the way the exchange listing prints it
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) if price.is_finite() => format!("${:?}", price),
        _ => "$nan".to_string(),
    }
}
