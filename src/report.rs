//! Text, JSON and CSV rendering of analysis results

use crate::cli::OutputFormat;
use crate::distribution::ValueDistribution;
use crate::price_search::PriceLookup;
use crate::stats::{is_all, LandSizeAverage, PropertySummary};
use crate::trend::{Direction, SalesTrend};
use serde::Serialize;

/// A result that can be printed in every output format
pub trait Render: Serialize {
    /// Human-readable report
    fn to_text(&self) -> String;

    /// Header row plus one row per record
    fn to_csv(&self) -> String;

    /// Pretty-printed JSON
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json(),
            OutputFormat::Csv => Ok(self.to_csv()),
        }
    }
}

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn optional(value: Option<f32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Render for PropertySummary {
    fn to_text(&self) -> String {
        let suburb = &self.suburb;
        let mut out = format!("\n Summary of the property in {}:\n", suburb);
        for c in &self.columns {
            let name = &c.column;
            out.push_str(&format!(
                "- Average {} available in the {}(Mean): {:.3}\n",
                name, suburb, c.mean
            ));
            match c.std_dev {
                Some(sd) => out.push_str(&format!(
                    "- Property in the {} have at least {:.3} {}\n",
                    suburb, sd, name
                )),
                None => out.push_str(&format!(
                    "- Property in the {} have at least nan {}\n",
                    suburb, name
                )),
            }
            out.push_str(&format!(
                "- The median number of {} in the {}: {:?}\n",
                name, suburb, c.median
            ));
            out.push_str(&format!(
                "- Lowest number of {} in the {}: {:?}\n",
                name, suburb, c.min
            ));
            out.push_str(&format!(
                "- Highest number of {} in the {}: {:?}\n",
                name, suburb, c.max
            ));
            out.push_str("---------------------------------------------------------\n");
        }
        out
    }

    fn to_csv(&self) -> String {
        let mut out = String::from("suburb,column,count,mean,std_dev,median,min,max\n");
        for c in &self.columns {
            out.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                escape_field(&self.suburb),
                c.column,
                c.count,
                c.mean,
                optional(c.std_dev),
                c.median,
                c.min,
                c.max
            ));
        }
        out
    }
}

impl Render for LandSizeAverage {
    fn to_text(&self) -> String {
        if is_all(&self.suburb) {
            format!(
                "Average land size across all suburbs is: {:.2} m^2\n",
                self.mean_square_metres
            )
        } else {
            format!(
                "Average land size for the suburb {} is: {:.2} m^2\n",
                self.suburb, self.mean_square_metres
            )
        }
    }

    fn to_csv(&self) -> String {
        format!(
            "suburb,listings,mean_square_metres\n{},{},{:.2}\n",
            escape_field(&self.suburb),
            self.listings,
            self.mean_square_metres
        )
    }
}

impl Render for ValueDistribution {
    fn to_text(&self) -> String {
        let mut out = String::new();
        if self.rate.fell_back {
            out.push_str(&format!(
                "Currency {} not found. Using AUD for the histogram.\n",
                self.rate.requested
            ));
        }
        out.push_str(&format!(
            "Using conversion rate: {} for currency: {}\n",
            self.rate.rate, self.rate.requested
        ));
        out.push_str(&format!(
            "Property values in {} ({} listings, {} in millions):\n",
            self.suburb,
            self.values.len(),
            self.rate.currency
        ));

        let peak = self.histogram.peak().max(1);
        for bin in self.histogram.bins.iter().filter(|b| b.count > 0) {
            let bar = "#".repeat((bin.count * 40).div_ceil(peak));
            out.push_str(&format!(
                "{:>10.3} - {:<10.3} {:>6} {}\n",
                bin.lower, bin.upper, bin.count, bar
            ));
        }
        out
    }

    fn to_csv(&self) -> String {
        let mut out = String::from("lower,upper,count\n");
        for bin in &self.histogram.bins {
            out.push_str(&format!("{},{},{}\n", bin.lower, bin.upper, bin.count));
        }
        out
    }
}

impl Render for SalesTrend {
    fn to_text(&self) -> String {
        let mut out = String::from("Sales Trend Over the Years for properties\n");
        out.push_str("year   sold\n");
        for (year, count) in &self.yearly_sales {
            out.push_str(&format!("{:<6} {:>4}\n", year, count));
        }
        for segment in self.segments() {
            let label = match segment.direction {
                Direction::Rise => "Raise in Sales",
                Direction::Dip => "Dip in Sales",
            };
            out.push_str(&format!(
                "{} -> {}: {} ({} -> {})\n",
                segment.from_year, segment.to_year, label, segment.from_count, segment.to_count
            ));
        }
        out
    }

    fn to_csv(&self) -> String {
        let mut out = String::from("year,sold\n");
        for (year, count) in &self.yearly_sales {
            out.push_str(&format!("{},{}\n", year, count));
        }
        out
    }
}

impl Render for PriceLookup {
    fn to_text(&self) -> String {
        let mut out = format!("Filtered Dataframe Size: {}\n", self.eligible_listings);
        if self.suburb_prices > 0 {
            out.push_str(&format!(
                "Number of Prices in {}: {}\n",
                self.suburb, self.suburb_prices
            ));
            out.push_str(&format!(
                "Search Result for {:?}: {}\n",
                self.target_price,
                if self.found { "True" } else { "False" }
            ));
        }
        let verdict = if self.found { "was found" } else { "was not found" };
        out.push_str(&format!(
            "The target price {:?} {} in {}.\n",
            self.target_price, verdict, self.suburb
        ));
        out
    }

    fn to_csv(&self) -> String {
        format!(
            "target_price,suburb,eligible_listings,suburb_prices,found\n{},{},{},{},{}\n",
            self.target_price,
            escape_field(&self.suburb),
            self.eligible_listings,
            self.suburb_prices,
            self.found
        )
    }
}

/// Prices of a converted dataset as printed by the exchange command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangedPrices {
    pub rate: f64,
    pub prices: Vec<String>,
}

impl Render for ExchangedPrices {
    fn to_text(&self) -> String {
        format!("[{}]\n", self.prices.join(" "))
    }

    fn to_csv(&self) -> String {
        let mut out = String::from("formatted_price\n");
        for price in &self.prices {
            out.push_str(price);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::CurrencyTable;
    use crate::dataset::Dataset;
    use crate::distribution::value_distribution;
    use crate::listing::{LandSize, Listing};
    use crate::stats::ColumnSummary;

    fn lookup(found: bool, suburb_prices: usize) -> PriceLookup {
        PriceLookup {
            target_price: 881000.0,
            suburb: "Clayton".to_string(),
            eligible_listings: 12,
            suburb_prices,
            found,
        }
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Kew"), "Kew");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_lookup_text_found() {
        let text = lookup(true, 3).to_text();
        assert!(text.contains("Filtered Dataframe Size: 12"));
        assert!(text.contains("Number of Prices in Clayton: 3"));
        assert!(text.contains("Search Result for 881000.0: True"));
        assert!(text.contains("The target price 881000.0 was found in Clayton."));
    }

    #[test]
    fn test_lookup_text_unknown_suburb() {
        let text = lookup(false, 0).to_text();
        assert!(!text.contains("Number of Prices"));
        assert!(text.contains("was not found in Clayton."));
    }

    #[test]
    fn test_lookup_json() {
        let json = lookup(true, 3).render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["found"], true);
        assert_eq!(value["suburb_prices"], 3);
    }

    #[test]
    fn test_lookup_csv() {
        let csv = lookup(false, 2).render(OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("target_price,suburb,eligible_listings,suburb_prices,found\n"));
        assert!(csv.contains("881000,Clayton,12,2,false"));
    }

    #[test]
    fn test_land_size_text() {
        let all = LandSizeAverage {
            suburb: "all".to_string(),
            listings: 3,
            mean_square_metres: 650.4167,
        };
        assert_eq!(
            all.to_text(),
            "Average land size across all suburbs is: 650.42 m^2\n"
        );

        let clayton = LandSizeAverage {
            suburb: "Clayton".to_string(),
            listings: 3,
            mean_square_metres: 571.04,
        };
        assert!(clayton.to_text().contains("for the suburb Clayton is: 571.04 m^2"));
    }

    #[test]
    fn test_summary_text_and_csv() {
        let summary = PropertySummary {
            suburb: "Clayton".to_string(),
            listings: 2,
            columns: vec![ColumnSummary::from_values("bathrooms", &[1.0, 2.0]).unwrap()],
        };

        let text = summary.to_text();
        assert!(text.contains("Summary of the property in Clayton:"));
        assert!(text.contains("- Average bathrooms available in the Clayton(Mean): 1.500"));
        assert!(text.contains("- The median number of bathrooms in the Clayton: 1.5"));
        assert!(text.contains("- Highest number of bathrooms in the Clayton: 2.0"));

        let csv = summary.to_csv();
        assert!(csv.contains("Clayton,bathrooms,2,1.5,"));
    }

    #[test]
    fn test_distribution_text_reports_fallback() {
        let dataset = Dataset::from_listings(vec![Listing::new(
            "Kew",
            Some(2_000_000.0),
            LandSize::Unknown,
        )]);
        let dist = value_distribution(&dataset, "Kew", "xyz", &CurrencyTable::new(), 5);
        let text = dist.to_text();
        assert!(text.contains("Currency XYZ not found. Using AUD for the histogram."));
        assert!(text.contains("Using conversion rate: 1 for currency: XYZ"));

        let csv = dist.to_csv();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_trend_text_labels() {
        let trend = SalesTrend {
            yearly_sales: vec![(2019, 2), (2020, 1)],
            skipped: 0,
        };
        let text = trend.to_text();
        assert!(text.contains("2019 -> 2020: Dip in Sales (2 -> 1)"));
        assert_eq!(trend.to_csv(), "year,sold\n2019,2\n2020,1\n");
    }

    #[test]
    fn test_exchanged_prices_text() {
        let prices = ExchangedPrices {
            rate: 2.0,
            prices: vec!["$2.0".to_string(), "$nan".to_string()],
        };
        assert_eq!(prices.to_text(), "[$2.0 $nan]\n");
        assert_eq!(prices.to_csv(), "formatted_price\n$2.0\n$nan\n");
    }
}
