//! Exchange rates from AUD used by the value distribution

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Currency every listing price is recorded in
pub const BASE_CURRENCY: &str = "AUD";

const DEFAULT_RATES: [(&str, f64); 10] = [
    ("AUD", 1.0),
    ("USD", 0.66),
    ("INR", 54.25),
    ("CNY", 4.72),
    ("JPY", 93.87),
    ("HKD", 5.12),
    ("KRW", 860.92),
    ("GBP", 0.51),
    ("EUR", 0.60),
    ("SGD", 0.88),
];

/// Rate chosen for a requested currency code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRate {
    /// Upper-cased code as requested
    pub requested: String,
    /// Code the rate belongs to (`AUD` after a fallback)
    pub currency: String,
    pub rate: f64,
    pub fell_back: bool,
}

/// Currency code to rate-from-AUD table
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyTable {
    rates: BTreeMap<String, f64>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self {
            rates: DEFAULT_RATES
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        }
    }
}

impl CurrencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace rates (codes are upper-cased)
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        for (code, rate) in overrides {
            self.rates.insert(code.to_uppercase(), *rate);
        }
        self
    }

    /// Rate for `code`, if the table knows it
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.trim().to_uppercase()).copied()
    }

    /// Resolve `code`, falling back to AUD for unknown currencies
    pub fn resolve(&self, code: &str) -> ResolvedRate {
        let requested = code.trim().to_uppercase();
        match self.rates.get(&requested) {
            Some(&rate) => ResolvedRate {
                currency: requested.clone(),
                requested,
                rate,
                fell_back: false,
            },
            None => {
                warn!(currency = %requested, "unknown currency, using AUD");
                ResolvedRate {
                    requested,
                    currency: BASE_CURRENCY.to_string(),
                    rate: 1.0,
                    fell_back: true,
                }
            }
        }
    }

    /// Codes and rates in code order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    /// One-line reference listing, e.g. `AUD: 1, USD: 0.66`
    pub fn reference_line(&self) -> String {
        self.iter()
            .map(|(code, rate)| format!("{}: {}", code, rate))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
