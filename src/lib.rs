//! propscan - exploratory data analysis for real-estate listing datasets
//!
//! This library loads a listing CSV into an immutable table and provides
//! descriptive statistics, value distribution and sales trend charts, and a
//! sorted price lookup over a suburb's listings.

pub mod analyzer;
pub mod chart;
pub mod cli;
pub mod config;
pub mod currency;
pub mod dataset;
pub mod distribution;
pub mod error;
pub mod listing;
pub mod menu;
pub mod price_search;
pub mod report;
pub mod stats;
pub mod trend;
