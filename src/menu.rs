//! Interactive menu loop
//!
//! Reads choices line by line from any `BufRead` and writes prompts and
//! reports to any `Write`, so the loop can be driven by tests as well as by
//! a terminal.

use crate::analyzer::PropertyAnalyzer;
use crate::error::{AnalyzerError, Result};
use crate::report::Render;
use std::io::{BufRead, Write};
use tracing::debug;

const MENU: &str = "
Property Analyzer Menu:
1. Property Summary
2. Average Land Size
3. Property Values
4. Sales Trend of the properties over the years
5. Locate Price
6. Currency Exchange to AUD
7. Exit
";

/// Prompt and read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Parse a number typed at a prompt, reporting bad input instead of failing
fn read_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> Result<Option<Option<f64>>> {
    let Some(raw) = prompt(input, output, text)? else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(Some(value))),
        _ => {
            writeln!(output, "Invalid number: {:?}", raw)?;
            Ok(Some(None))
        }
    }
}

/// Run the menu until the user exits or input ends
pub fn run_menu<R: BufRead, W: Write>(
    analyzer: &mut PropertyAnalyzer,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        write!(output, "{}", MENU)?;
        let Some(choice) = prompt(input, output, "Enter your choice (1-7): ")? else {
            break;
        };
        debug!(choice = %choice, "menu choice");

        match choice.as_str() {
            "1" => {
                let Some(suburb) = prompt(
                    input,
                    output,
                    "Enter the suburb name, First letter should be in caps eg: Clayton : ",
                )?
                else {
                    break;
                };
                match analyzer.property_summary(&suburb) {
                    Some(summary) => write!(output, "{}", summary.to_text())?,
                    None => writeln!(output, "\nNo data available for {} after filtering.", suburb)?,
                }
            }
            "2" => {
                let Some(suburb) = prompt(
                    input,
                    output,
                    "Enter the suburb First letter should be in caps eg: Clayton ('all' for all suburbs): ",
                )?
                else {
                    break;
                };
                match analyzer.average_land_size(&suburb) {
                    Ok(average) => write!(output, "{}", average.to_text())?,
                    Err(AnalyzerError::UnknownSuburb(_)) => {
                        writeln!(output, "Invalid Suburb. Please enter a valid suburb.")?
                    }
                    Err(e) => writeln!(output, "{}", e)?,
                }
            }
            "3" => {
                let Some(suburb) = prompt(
                    input,
                    output,
                    "Enter the suburb First letter should be in caps eg: Clayton ('all' for all suburbs): ",
                )?
                else {
                    break;
                };
                let Some(currency) =
                    prompt(input, output, "Enter the target currency (e.g., AUD, USD): ")?
                else {
                    break;
                };
                match analyzer.value_distribution(&suburb, &currency) {
                    Ok((distribution, path)) => {
                        write!(output, "{}", distribution.to_text())?;
                        writeln!(output, "Chart saved to {}", path.display())?;
                    }
                    Err(e) => writeln!(output, "Could not write chart: {}", e)?,
                }
            }
            "4" => match analyzer.sales_trend() {
                Ok((trend, path)) => {
                    write!(output, "{}", trend.to_text())?;
                    writeln!(output, "Chart saved to {}", path.display())?;
                }
                Err(e) => writeln!(output, "Could not write chart: {}", e)?,
            },
            "5" => {
                let Some(price) = read_number(input, output, "Enter the target price: ")? else {
                    break;
                };
                let Some(price) = price else {
                    continue;
                };
                let Some(suburb) = prompt(
                    input,
                    output,
                    "Enter the target suburb First letter should be in caps eg: Clayton: ",
                )?
                else {
                    break;
                };
                write!(output, "{}", analyzer.locate_price(price, &suburb).to_text())?;
            }
            "6" => {
                writeln!(
                    output,
                    "Enter the Exchange rate, below are the exchange rate details for your reference"
                )?;
                writeln!(output, "{}", analyzer.currencies().reference_line())?;
                let Some(rate) = read_number(input, output, "Enter the Exchange rate: ")? else {
                    break;
                };
                let Some(rate) = rate else {
                    continue;
                };
                match analyzer.exchange(rate) {
                    Ok(prices) => write!(output, "{}", prices.to_text())?,
                    Err(e) => writeln!(output, "{}", e)?,
                }
            }
            "7" => {
                writeln!(output, "Thank you for using Property Analyzer.")?;
                break;
            }
            _ => writeln!(output, "Invalid choice. Please enter a valid option (1-7).")?,
        }
    }

    output.flush()?;
    Ok(())
}
