// src/main.rs
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;
use uuid::Uuid;

use screening_lib::{
    detect_with_report,
    models::{DetectionStrategy, FieldMapping, MatchRecord},
    records_from_json,
    results::RowError,
};

/// Screen an incoming roster against the existing beneficiary records and
/// report likely duplicates.
#[derive(Parser)]
#[command(name = "screen", version, about)]
struct Cli {
    /// JSON file holding the incoming roster rows (array of objects)
    #[arg(long)]
    incoming: PathBuf,

    /// JSON file holding the existing candidate rows (array of objects)
    #[arg(long)]
    candidates: PathBuf,

    /// Minimum similarity score (0-100) for a pair to be reported.
    /// Out-of-range values are accepted: above 100 nothing matches, at or
    /// below 0 every compared pair matches.
    #[arg(long)]
    threshold: i32,

    /// Field dialect of the incoming rows
    #[arg(long, value_enum, default_value_t = RowFormat::Excel)]
    incoming_format: RowFormat,

    /// Field dialect of the candidate rows
    #[arg(long, value_enum, default_value_t = RowFormat::Db)]
    candidate_format: RowFormat,

    /// Write the JSON report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum RowFormat {
    /// Spreadsheet upload headers ("Name", "First Name", ...)
    Excel,
    /// Database column names (name, first_name, ...)
    Db,
}

impl RowFormat {
    fn mapping(self) -> FieldMapping {
        match self {
            Self::Excel => FieldMapping::excel(),
            Self::Db => FieldMapping::db(),
        }
    }
}

/// The report shape consumed by the upload-review UI.
#[derive(Serialize)]
struct ScreeningReport {
    run_id: String,
    strategy: DetectionStrategy,
    threshold: i32,
    matches: Vec<MatchRecord>,
    skipped_rows: Vec<RowError>,
}

fn load_rows(path: &PathBuf, mapping: &FieldMapping) -> Result<(Vec<screening_lib::NameRecord>, Vec<RowError>)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    records_from_json(&value, mapping)
        .with_context(|| format!("{} does not hold an array of rows", path.display()))
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let run_id = Uuid::new_v4().to_string();
    info!("Starting roster screening run {}", run_id);

    let (incoming, mut skipped_rows) = load_rows(&cli.incoming, &cli.incoming_format.mapping())?;
    let (candidates, candidate_skips) = load_rows(&cli.candidates, &cli.candidate_format.mapping())?;
    skipped_rows.extend(candidate_skips);
    info!(
        "Loaded {} incoming and {} candidate records",
        incoming.len(),
        candidates.len()
    );

    let report = detect_with_report(&incoming, &candidates, cli.threshold, None)?;
    info!(
        "Run {} used the {} strategy: {} matches from {} compared pairs in {:.2?}",
        run_id,
        report.strategy.as_str(),
        report.stats.matches_found,
        report.stats.pairs_compared,
        report.stats.processing_time
    );

    skipped_rows.extend(report.row_errors);
    let output = ScreeningReport {
        run_id,
        strategy: report.strategy,
        threshold: cli.threshold,
        matches: report.matches,
        skipped_rows,
    };
    let rendered = serde_json::to_string_pretty(&output).context("failed to serialize report")?;

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", rendered),
    }
    Ok(())
}
