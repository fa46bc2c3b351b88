use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use dhaja_allocation::{
    config::{ColumnLayout, RunConfig},
    logger, report, run_allocation,
};

/// Allocates bookings (Book1) to dhaja allotments (Book2), at most two bookings per allotment.
#[derive(Debug, Parser)]
#[command(name = "dhaja-allocation", version, about)]
struct Cli {
    /// Bookings spreadsheet (.xlsx or .csv), first sheet is used
    #[arg(long, short = 'b')]
    bookings: PathBuf,

    /// Allotments workbook (.xlsx, every sheet) or a single .csv sheet
    #[arg(long, short = 'a')]
    allotments: PathBuf,

    /// Output workbook
    #[arg(long, short = 'o', default_value = "Allocation_Results.xlsx")]
    output: PathBuf,

    /// JSON file overriding column names and header rows
    #[arg(long)]
    columns: Option<PathBuf>,

    /// Also write a ';'-separated per-sheet summary here
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print the first N rows of the first allotment sheet and of the bookings
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Log level (error, warn, info, debug, trace); defaults to RUST_LOG or info
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init(cli.log_level.as_deref());
    log::info!("Starting allocation.");

    let layout = match &cli.columns {
        Some(path) => ColumnLayout::from_json_file(path).with_context(|| format!("Failed to load column layout '{}'", path.display()))?,
        None => ColumnLayout::default(),
    };

    let config = RunConfig {
        bookings_path: cli.bookings,
        allotments_path: cli.allotments,
        output_path: cli.output,
        summary_path: cli.summary,
        layout,
    };

    let run = run_allocation(&config).context("Allocation run failed")?;

    if let Some(rows) = cli.preview {
        if let Some(first) = run.summary.sheets.first() {
            if let Some(table) = run.allotments.iter().find(|t| t.name == first.sheet) {
                report::print_preview(table, rows);
            }
        }
        report::print_preview(&run.bookings, rows);
    }

    report::print_summary(&run);
    log::info!("Allocation complete.");

    Ok(())
}
