//! Batch ROI over an institutions CSV
//!
//! Ranks every institution with tuition and earnings data by net ROI and
//! writes one CSV row per institution.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use college_roi::{institution::load_institutions, ScenarioRunner};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "batch_roi")]
#[command(about = "Rank institutions from a CSV by net ROI", long_about = None)]
struct Args {
    /// Institutions CSV
    #[arg(long, default_value = "data/institutions_sample.csv")]
    input: PathBuf,

    /// Output CSV (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory with assumption CSV overrides
    #[arg(long)]
    assumptions: Option<PathBuf>,

    #[arg(long)]
    in_state: bool,

    #[arg(long)]
    include_room_board: bool,

    #[arg(long)]
    include_books: bool,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    rank: usize,
    unit_id: u32,
    name: &'a str,
    control: &'static str,
    annual_cost: f64,
    total_cost: f64,
    annual_earnings_premium: f64,
    net_roi: f64,
    roi_percentage: f64,
    /// Empty when the cost is never paid back
    payback_years: Option<f64>,
    payback: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = match &args.assumptions {
        Some(dir) => ScenarioRunner::from_csv_path(dir)
            .with_context(|| format!("Failed to load assumptions from {}", dir.display()))?,
        None => ScenarioRunner::new(),
    };

    let start = Instant::now();
    let institutions = load_institutions(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    log::info!("Loaded {} institutions in {:?}", institutions.len(), start.elapsed());

    let rows = runner.compare(
        &institutions,
        args.in_state,
        args.include_room_board,
        args.include_books,
    );
    log::info!(
        "Ranked {} of {} institutions in {:?}",
        rows.len(),
        institutions.len(),
        start.elapsed()
    );

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Unable to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);

    for (index, row) in rows.iter().enumerate() {
        writer.serialize(OutputRow {
            rank: index + 1,
            unit_id: row.unit_id,
            name: &row.name,
            control: row.institution_type.as_str(),
            annual_cost: row.annual_cost,
            total_cost: row.roi.total_cost,
            annual_earnings_premium: row.roi.annual_earnings_premium,
            net_roi: row.roi.net_roi,
            roi_percentage: row.roi.roi_percentage,
            payback_years: row.roi.payback_years.years(),
            payback: row.roi.payback_years.label(),
        })?;
    }
    writer.flush()?;

    Ok(())
}
