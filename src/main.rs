use anyhow::{Context, Result};
use clap::Parser;
use propscan::{
    analyzer::PropertyAnalyzer,
    cli::{Cli, Command, OutputFormat},
    config::AnalyzerConfig,
    dataset::Dataset,
    menu,
    report::Render,
};
use std::io;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` forces TRACE, otherwise RUST_LOG or warn
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print a result in the selected format
fn emit<T: Render>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = value
        .render(format)
        .context("Failed to serialize result")?;
    print!("{}", rendered);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn note_chart(path: &Path, format: OutputFormat) {
    // Keep machine-readable stdout clean.
    if format == OutputFormat::Text {
        println!("Chart saved to {}", path.display());
    } else {
        eprintln!("Chart saved to {}", path.display());
    }
}

fn run_command(
    analyzer: &mut PropertyAnalyzer,
    command: Command,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Command::Summary { suburb } => match analyzer.property_summary(&suburb) {
            Some(summary) => emit(&summary, format)?,
            None => println!("\nNo data available for {} after filtering.", suburb),
        },
        Command::LandSize { suburb } => {
            let average = analyzer.average_land_size(&suburb)?;
            emit(&average, format)?;
        }
        Command::Distribution { suburb, currency } => {
            let (distribution, path) = analyzer.value_distribution(&suburb, &currency)?;
            emit(&distribution, format)?;
            note_chart(&path, format);
        }
        Command::Trend => {
            let (trend, path) = analyzer.sales_trend()?;
            emit(&trend, format)?;
            note_chart(&path, format);
        }
        Command::Locate { price, suburb } => {
            let lookup = analyzer.locate_price(price, &suburb);
            emit(&lookup, format)?;
        }
        Command::Exchange { rate } => {
            let prices = analyzer.exchange(rate)?;
            emit(&prices, format)?;
        }
        Command::Menu => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            menu::run_menu(analyzer, &mut stdin.lock(), &mut stdout.lock())?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let mut config = AnalyzerConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    let dataset = Dataset::from_path(&args.data)
        .with_context(|| format!("Failed to load dataset {}", args.data.display()))?;

    let mut analyzer = PropertyAnalyzer::new(dataset, config);
    run_command(
        &mut analyzer,
        args.command.unwrap_or(Command::Menu),
        args.format,
    )?;

    Ok(())
}
