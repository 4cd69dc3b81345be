//! Cloud Pricing CLI
//!
//! Calculates every definition against the rate table and prints the pricing
//! tables, or exports them as CSV/JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use cloud_pricing::{
    definition::{load_definitions, loader::DEFAULT_DEFINITIONS_PATH},
    output::{render_table, write_csv, write_json, METHODOLOGY},
    rates::DEFAULT_RATES_PATH,
    BatchRunner, CalculationConfig, CalculationReport, RateTable, SupportSchedule,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "cloud_pricing", version, about = "Project cloud costs with support surcharges")]
struct Cli {
    /// Stack definitions (JSON)
    #[arg(long, default_value = DEFAULT_DEFINITIONS_PATH)]
    definitions: PathBuf,

    /// Rate table (CSV: service,resource,hourly,one_time_year1,one_time_year3)
    #[arg(long, default_value = DEFAULT_RATES_PATH)]
    rates: PathBuf,

    /// Replace the standard support tiers (CSV: threshold,rate)
    #[arg(long)]
    support_tiers: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Only calculate the named definition
    #[arg(long)]
    only: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let mut definitions = load_definitions(&cli.definitions)
        .with_context(|| format!("loading definitions from {}", cli.definitions.display()))?;
    if let Some(only) = &cli.only {
        definitions.retain(|definition| &definition.name == only);
        if definitions.is_empty() {
            bail!("no definition named '{}'", only);
        }
    }

    let rates = RateTable::from_csv(&cli.rates)
        .with_context(|| format!("loading rates from {}", cli.rates.display()))?;
    eprintln!("Loaded {} rates in {:?}", rates.len(), start.elapsed());

    let mut config = CalculationConfig::default();
    if let Some(path) = &cli.support_tiers {
        let schedule = SupportSchedule::from_csv(path)
            .with_context(|| format!("loading support tiers from {}", path.display()))?;
        config = config.with_support(schedule);
    }

    let runner = BatchRunner::new(rates, config);
    for (service, loaded) in runner.offering_status(&definitions) {
        if loaded {
            eprintln!(" Loading {}...Done", service);
        } else {
            eprintln!(" Loading {}...no offering found", service);
        }
    }

    let outcomes = runner.run(&definitions);

    let mut reports: Vec<&CalculationReport> = Vec::new();
    let mut failures = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => reports.push(report),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", outcome.name, e);
            }
        }
    }

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match cli.format {
        OutputFormat::Table => {
            writeln!(out, "Calculation Methodology:")?;
            for line in METHODOLOGY {
                writeln!(out, "  {}", line)?;
            }
            for report in &reports {
                writeln!(out, "\n{}", report.definition)?;
                writeln!(out, "{}", "=".repeat(report.definition.len()))?;
                write!(out, "{}", render_table(report))?;
            }
        }
        OutputFormat::Csv => write_csv(&reports, &mut out)?,
        OutputFormat::Json => write_json(&reports, &mut out)?,
    }
    out.flush()?;

    eprintln!(
        "Calculated {} of {} definitions in {:?}",
        reports.len(),
        outcomes.len(),
        start.elapsed()
    );

    if failures > 0 {
        bail!("{} definition(s) failed", failures);
    }
    Ok(())
}
