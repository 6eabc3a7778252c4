//! Analysis session: one dataset plus the settings every operation needs
//!
//! The session owns its current `Dataset` by value. Currency exchange swaps
//! in a derived dataset, so later operations see the converted prices
//! without anything being mutated in place.

use crate::chart;
use crate::config::AnalyzerConfig;
use crate::currency::CurrencyTable;
use crate::dataset::Dataset;
use crate::distribution::{value_distribution, ValueDistribution};
use crate::error::Result;
use crate::price_search::{lookup_price, PriceLookup};
use crate::report::ExchangedPrices;
use crate::stats::{average_land_size, property_summary, LandSizeAverage, PropertySummary};
use crate::trend::{sales_trend, SalesTrend};
use std::path::PathBuf;
use tracing::info;

/// File name of the sales trend chart
pub const TREND_CHART_FILE: &str = "sales_trend.svg";

#[derive(Debug, Clone)]
pub struct PropertyAnalyzer {
    dataset: Dataset,
    config: AnalyzerConfig,
    currencies: CurrencyTable,
}

impl PropertyAnalyzer {
    pub fn new(dataset: Dataset, config: AnalyzerConfig) -> Self {
        let currencies = config.currency_table();
        Self {
            dataset,
            config,
            currencies,
        }
    }

    /// Dataset the next operation will run on
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    pub fn property_summary(&self, suburb: &str) -> Option<PropertySummary> {
        property_summary(&self.dataset, suburb)
    }

    pub fn average_land_size(&self, suburb: &str) -> Result<LandSizeAverage> {
        average_land_size(&self.dataset, suburb)
    }

    /// Build the value distribution and write its SVG chart
    pub fn value_distribution(
        &self,
        suburb: &str,
        currency: &str,
    ) -> Result<(ValueDistribution, PathBuf)> {
        let distribution = value_distribution(
            &self.dataset,
            suburb,
            currency,
            &self.currencies,
            self.config.histogram_bins,
        );
        let path = chart::write_chart(
            &self.config.output_dir,
            &distribution.chart_file_name(),
            &chart::histogram_svg(&distribution),
        )?;
        Ok((distribution, path))
    }

    /// Count sales per year and write the trend chart
    pub fn sales_trend(&self) -> Result<(SalesTrend, PathBuf)> {
        let trend = sales_trend(&self.dataset);
        let path = chart::write_chart(
            &self.config.output_dir,
            TREND_CHART_FILE,
            &chart::trend_svg(&trend),
        )?;
        Ok((trend, path))
    }

    pub fn locate_price(&self, target_price: f64, target_suburb: &str) -> PriceLookup {
        lookup_price(&self.dataset, target_price, target_suburb)
    }

    /// Convert every price by `rate` and continue with the converted dataset
    pub fn exchange(&mut self, rate: f64) -> Result<ExchangedPrices> {
        let converted = self.dataset.with_exchange_rate(rate)?;
        let prices = converted.formatted_prices();
        self.dataset = converted;
        info!(rate, "switched session to exchanged prices");
        Ok(ExchangedPrices { rate, prices })
    }
}
