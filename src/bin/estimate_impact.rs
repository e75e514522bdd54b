//! Estimate Impact CLI
//!
//! Prints an impact report (or a batch report) as JSON.
//!
//! Run with:
//!   cargo run --bin estimate_impact -- plastic 5
//!   cargo run --bin estimate_impact -- --batch items.json
//!   cargo run --bin estimate_impact -- --factors factors.json metal 2.5

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waste_impact::request::{parse_batch, parse_json};
use waste_impact::{FactorTable, ImpactEstimator};

#[derive(Parser)]
#[command(name = "estimate_impact")]
#[command(about = "Estimate the environmental impact of diverting waste from landfill")]
struct Args {
    /// Waste category (plastic, paper, metal, ...)
    #[arg(required_unless_present_any = ["batch", "list_categories"])]
    waste_type: Option<String>,

    /// Weight in kilograms
    #[arg(required_unless_present_any = ["batch", "list_categories"], allow_negative_numbers = true)]
    weight_kg: Option<f64>,

    /// JSON file with a batch body ({"items": [...]} or a bare array)
    #[arg(short, long, conflicts_with_all = ["waste_type", "weight_kg"])]
    batch: Option<PathBuf>,

    /// Estimate batch items in parallel
    #[arg(long, requires = "batch")]
    parallel: bool,

    /// JSON factor table replacing the built-in reference factors
    #[arg(short, long)]
    factors: Option<PathBuf>,

    /// Print the reference factor table and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waste_impact=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let table = match &args.factors {
        Some(path) => FactorTable::load(path)?,
        None => FactorTable::default(),
    };
    let estimator = ImpactEstimator::new(&table);

    if args.list_categories {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    if let Some(path) = &args.batch {
        let body = fs::read(path).with_context(|| format!("Failed to read batch file: {:?}", path))?;
        let entries = parse_json(&body).and_then(|value| parse_batch(&value))?;

        let report = if args.parallel {
            estimator.estimate_entries_parallel(&entries)
        } else {
            estimator.estimate_entries(&entries)
        };

        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // clap guarantees both positionals when neither --batch nor --list-categories is set
    let (Some(waste_type), Some(weight_kg)) = (args.waste_type.as_deref(), args.weight_kg) else {
        anyhow::bail!("waste_type and weight_kg are required");
    };

    let report = estimator.estimate(waste_type, weight_kg)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
