//! CLI argument parsing for propscan

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "propscan")]
#[command(version)]
#[command(about = "Exploratory analysis of real-estate listing CSV files", long_about = None)]
pub struct Cli {
    /// Listing CSV file to analyze
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "property_information.csv"
    )]
    pub data: PathBuf,

    /// Configuration file (defaults to ./propscan.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for generated charts (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format (text, json or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable trace-level logging on stderr
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Bedroom, bathroom and parking statistics for a suburb ("all" for every suburb)
    Summary {
        /// Suburb name, capitalised as in the data (e.g. Clayton)
        suburb: String,
    },

    /// Average land size in m² for a suburb ("all" for every suburb)
    LandSize { suburb: String },

    /// Histogram of property values in a target currency
    Distribution {
        suburb: String,

        /// Target currency code (AUD, USD, INR, ...)
        #[arg(long, default_value = "AUD")]
        currency: String,
    },

    /// Number of properties sold per year
    Trend,

    /// Check whether a suburb has a listing at exactly this price
    Locate {
        /// Target price
        #[arg(allow_negative_numbers = true)]
        price: f64,
        /// Target suburb
        suburb: String,
    },

    /// Multiply every price by an exchange rate and list the results
    Exchange {
        /// Exchange rate from AUD
        rate: f64,
    },

    /// Interactive menu (default)
    Menu,
}
