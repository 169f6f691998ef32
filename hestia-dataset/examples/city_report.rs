use std::path::PathBuf;

use clap::Parser;
use hestia_api_types::City;
use hestia_dataset::{load_listings, load_neighbourhood_summary};
use hestia_stats::{build_city_report, DEFAULT_NEIGHBOURS};
use log::info;

/// Prints the full dashboard payload for one city as JSON.
#[derive(Parser)]
struct Args {
    /// Path to the listings csv
    listings: PathBuf,
    /// City to report on, e.g. "Amsterdam"
    city: City,
    /// Path to the pre-computed neighbourhood means csv
    #[arg(long)]
    summary: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_NEIGHBOURS)]
    neighbours: usize,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let listings = load_listings(&args.listings)?;
    let report = build_city_report(&listings, args.city, args.neighbours)?;

    if let Some(summary) = &args.summary {
        let rows = load_neighbourhood_summary(summary)?;
        let covered = rows.iter().filter(|row| row.city == args.city).count();
        info!("shipped summary covers {covered} neighbourhoods of {}", args.city);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
