//! Quote the support surcharge for a given monthly spend
//!
//! Usage: cargo run --bin support_quote -- 300000 --one-time-year1 12000

use anyhow::{Context, Result};
use clap::Parser;
use cloud_pricing::{
    money::DIVISION_SCALE,
    output::{format_pricing, COLUMN_HEADERS},
    Money, PricingHorizon, SupportSchedule,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "support_quote", about = "Show the support surcharge band by band")]
struct Args {
    /// Monthly spend to quote against
    monthly: Money,

    /// One-time fees charged in year one
    #[arg(long, default_value = "0")]
    one_time_year1: Money,

    /// One-time fees for the three-year term
    #[arg(long, default_value = "0")]
    one_time_year3: Money,

    /// Replace the standard support tiers (CSV: threshold,rate)
    #[arg(long)]
    support_tiers: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let schedule = match &args.support_tiers {
        Some(path) => SupportSchedule::from_csv(path)
            .with_context(|| format!("loading support tiers from {}", path.display()))?,
        None => SupportSchedule::standard(),
    };

    println!("Monthly spend: {}", args.monthly.to_display());
    println!("{:>14} {:>6} {:>16} {:>14}", "Threshold", "Rate", "Portion", "Charge");
    println!("{}", "-".repeat(53));
    for band in schedule.breakdown(args.monthly)? {
        println!(
            "{:>14} {:>6} {:>16} {:>14}",
            band.threshold.to_display(),
            band.rate,
            band.portion.to_display(),
            band.charge.to_display()
        );
    }

    let spend = PricingHorizon {
        monthly: args.monthly,
        one_time_year1: args.one_time_year1,
        one_time_year3: args.one_time_year3,
        ..PricingHorizon::zero()
    };
    let support = schedule.support_horizon(&spend, DIVISION_SCALE)?;

    println!();
    for (header, cell) in COLUMN_HEADERS.iter().zip(format_pricing("Support", &support)) {
        println!("  {:<14} {:>16}", header, cell);
    }

    Ok(())
}
