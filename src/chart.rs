//! SVG chart rendering for the value distribution and the sales trend
//!
//! Charts are self-contained SVG documents with embedded styles, written
//! next to each other in the configured output directory.

use crate::distribution::ValueDistribution;
use crate::error::Result;
use crate::trend::{Direction, SalesTrend};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

const RISE_COLOR: &str = "green";
const DIP_COLOR: &str = "red";

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn generate_styles() -> &'static str {
    r#"
        text { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; fill: #333; }
        .title { font-size: 18px; font-weight: bold; }
        .label { font-size: 13px; }
        .tick { font-size: 11px; fill: #666; }
        .axis { stroke: #333; stroke-width: 1; }
        .grid { stroke: #ddd; stroke-width: 1; }
        .bar { fill: #4a90d9; fill-opacity: 0.7; stroke: black; stroke-width: 0.5; }
        .empty { font-size: 14px; fill: #888; }
    "#
}

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

/// Opening tags, styles, title and axis labels shared by both charts
fn open_document(title: &str, x_label: &str, y_label: &str) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = WIDTH,
        h = HEIGHT
    ));
    svg.push_str("  <style>");
    svg.push_str(generate_styles());
    svg.push_str("</style>\n");
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text class=\"title\" x=\"{}\" y=\"30\" text-anchor=\"middle\">{}</text>\n",
        WIDTH / 2.0,
        escape_xml(title)
    ));
    svg.push_str(&format!(
        "  <text class=\"label\" x=\"{}\" y=\"{}\" text-anchor=\"middle\">{}</text>\n",
        MARGIN_LEFT + plot_width() / 2.0,
        HEIGHT - 15.0,
        escape_xml(x_label)
    ));
    svg.push_str(&format!(
        "  <text class=\"label\" transform=\"translate(20 {}) rotate(-90)\" text-anchor=\"middle\">{}</text>\n",
        MARGIN_TOP + plot_height() / 2.0,
        escape_xml(y_label)
    ));

    // Axes
    let x0 = MARGIN_LEFT;
    let y0 = MARGIN_TOP + plot_height();
    svg.push_str(&format!(
        "  <line class=\"axis\" x1=\"{x0}\" y1=\"{y0}\" x2=\"{}\" y2=\"{y0}\"/>\n",
        x0 + plot_width()
    ));
    svg.push_str(&format!(
        "  <line class=\"axis\" x1=\"{x0}\" y1=\"{MARGIN_TOP}\" x2=\"{x0}\" y2=\"{y0}\"/>\n"
    ));

    svg
}

fn empty_notice(svg: &mut String) {
    svg.push_str(&format!(
        "  <text class=\"empty\" x=\"{}\" y=\"{}\" text-anchor=\"middle\">No data</text>\n",
        MARGIN_LEFT + plot_width() / 2.0,
        MARGIN_TOP + plot_height() / 2.0
    ));
}

/// Y-axis ticks at 0, max/2 and max
fn y_ticks(svg: &mut String, max: usize) {
    for value in [0, max / 2, max] {
        let y = MARGIN_TOP + plot_height() - plot_height() * value as f64 / max.max(1) as f64;
        svg.push_str(&format!(
            "  <line class=\"grid\" x1=\"{}\" y1=\"{y:.1}\" x2=\"{}\" y2=\"{y:.1}\"/>\n",
            MARGIN_LEFT,
            MARGIN_LEFT + plot_width()
        ));
        svg.push_str(&format!(
            "  <text class=\"tick\" x=\"{}\" y=\"{:.1}\" text-anchor=\"end\">{}</text>\n",
            MARGIN_LEFT - 6.0,
            y + 4.0,
            value
        ));
    }
}

/// Render the value distribution histogram
pub fn histogram_svg(distribution: &ValueDistribution) -> String {
    let currency = &distribution.rate.currency;
    let mut svg = open_document(
        &format!(
            "Property Value Distribution in {} ({})",
            distribution.suburb, currency
        ),
        &format!("Property Value ({}) in millions", currency),
        "Number of Properties",
    );

    let histogram = &distribution.histogram;
    if histogram.bins.is_empty() {
        empty_notice(&mut svg);
        svg.push_str("</svg>\n");
        return svg;
    }

    let peak = histogram.peak();
    y_ticks(&mut svg, peak);

    let bar_width = plot_width() / histogram.bins.len() as f64;
    for (i, bin) in histogram.bins.iter().enumerate() {
        let height = plot_height() * bin.count as f64 / peak.max(1) as f64;
        let x = MARGIN_LEFT + bar_width * i as f64;
        let y = MARGIN_TOP + plot_height() - height;
        svg.push_str(&format!(
            "  <rect class=\"bar\" x=\"{x:.1}\" y=\"{y:.1}\" width=\"{bar_width:.1}\" height=\"{height:.1}\"><title>{:.3}-{:.3}: {}</title></rect>\n",
            bin.lower, bin.upper, bin.count
        ));
    }

    // X-axis range labels
    if let (Some(first), Some(last)) = (histogram.bins.first(), histogram.bins.last()) {
        let y = MARGIN_TOP + plot_height() + 16.0;
        svg.push_str(&format!(
            "  <text class=\"tick\" x=\"{}\" y=\"{y}\" text-anchor=\"start\">{:.2}</text>\n",
            MARGIN_LEFT, first.lower
        ));
        svg.push_str(&format!(
            "  <text class=\"tick\" x=\"{}\" y=\"{y}\" text-anchor=\"end\">{:.2}</text>\n",
            MARGIN_LEFT + plot_width(),
            last.upper
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render the sales trend line chart with rise/dip coloured segments
pub fn trend_svg(trend: &SalesTrend) -> String {
    let mut svg = open_document(
        "Sales Trend Over the Years for properties",
        "Year",
        "Number of Properties Sold",
    );

    if trend.yearly_sales.is_empty() {
        empty_notice(&mut svg);
        svg.push_str("</svg>\n");
        return svg;
    }

    let max_count = trend
        .yearly_sales
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0);
    y_ticks(&mut svg, max_count);

    let first_year = trend.yearly_sales[0].0;
    let last_year = trend.yearly_sales[trend.yearly_sales.len() - 1].0;
    let span = (last_year - first_year).max(1) as f64;

    let point = |year: i32, count: usize| -> (f64, f64) {
        let x = if last_year == first_year {
            MARGIN_LEFT + plot_width() / 2.0
        } else {
            MARGIN_LEFT + plot_width() * (year - first_year) as f64 / span
        };
        let y = MARGIN_TOP + plot_height() - plot_height() * count as f64 / max_count.max(1) as f64;
        (x, y)
    };

    for segment in trend.segments() {
        let (x1, y1) = point(segment.from_year, segment.from_count);
        let (x2, y2) = point(segment.to_year, segment.to_count);
        let color = match segment.direction {
            Direction::Rise => RISE_COLOR,
            Direction::Dip => DIP_COLOR,
        };
        svg.push_str(&format!(
            "  <line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke=\"{color}\" stroke-width=\"2\"/>\n"
        ));
    }

    for &(year, count) in &trend.yearly_sales {
        let (x, y) = point(year, count);
        svg.push_str(&format!(
            "  <circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"4\" fill=\"#333\"><title>{year}: {count}</title></circle>\n"
        ));
        svg.push_str(&format!(
            "  <text class=\"tick\" x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{year}</text>\n",
            MARGIN_TOP + plot_height() + 16.0
        ));
    }

    // Legend
    let legend_x = WIDTH - MARGIN_RIGHT - 150.0;
    for (i, (color, label)) in [(RISE_COLOR, "Raise in Sales"), (DIP_COLOR, "Dip in Sales")]
        .iter()
        .enumerate()
    {
        let y = MARGIN_TOP + 10.0 + 18.0 * i as f64;
        svg.push_str(&format!(
            "  <line x1=\"{legend_x}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" stroke=\"{color}\" stroke-width=\"2\"/>\n",
            legend_x + 24.0
        ));
        svg.push_str(&format!(
            "  <text class=\"label\" x=\"{}\" y=\"{}\">{label}</text>\n",
            legend_x + 30.0,
            y + 4.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write `svg` to `dir/file_name`, creating `dir` if needed
pub fn write_chart(dir: &Path, file_name: &str, svg: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, svg)?;
    info!(path = %path.display(), bytes = svg.len(), "wrote chart");
    Ok(path)
}
