use std::path::PathBuf;

use crate::config::RunConfig;
use crate::domain::allocation::{AllocationDriver, LogListener, summary::AllocationSummary};
use crate::error::Result;
use crate::loader::mapping::{SheetWarning, bookings_from_table, sheet_from_table, write_back_bookings, write_back_sheet};
use crate::loader::table::Table;
use crate::loader::workbook_reader::{read_first_table, read_tables};
use crate::writer::{summary_writer::write_summary_file, workbook_writer::write_workbook};

pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod report;
pub mod writer;

/// Outcome of a complete run, after the output workbook has been written.
#[derive(Debug)]
pub struct RunReport {
    pub summary: AllocationSummary,
    pub warnings: Vec<SheetWarning>,
    pub output_path: PathBuf,
    /// Augmented bookings table, as written.
    pub bookings: Table,
    /// Augmented allotment tables (pass-through ones unchanged), as written.
    pub allotments: Vec<Table>,
}

/// Reads both spreadsheets, allocates, and writes the augmented workbook.
///
/// Any read failure aborts before anything is written. Allotment sheets
/// without a target column are reported in `RunReport::warnings` and copied
/// to the output unchanged.
pub fn run_allocation(config: &RunConfig) -> Result<RunReport> {
    let layout = &config.layout;

    let mut bookings_table = read_first_table(&config.bookings_path, layout.bookings_header_row)?;
    log::info!("Bookings file '{}' parsed successfully.", config.bookings_path.display());
    let mut allotment_tables = read_tables(&config.allotments_path, layout.allotments_header_row)?;
    log::info!("Allotments file '{}' parsed successfully ({} sheets).", config.allotments_path.display(), allotment_tables.len());

    let bookings = bookings_from_table(&bookings_table, layout)?;

    let mut warnings = Vec::new();
    let mut sheets = Vec::new();
    let mut sheet_tables = Vec::new();
    for (table_index, table) in allotment_tables.iter().enumerate() {
        if let Some(sheet) = sheet_from_table(table, layout, &mut warnings) {
            sheets.push(sheet);
            sheet_tables.push(table_index);
        }
    }

    let allocation = AllocationDriver::new(bookings).with_listener(Box::new(LogListener)).run(sheets);

    write_back_bookings(&mut bookings_table, &allocation.bookings, &allocation.sheets, layout);
    for (sheet, table_index) in allocation.sheets.iter().zip(sheet_tables) {
        write_back_sheet(&mut allotment_tables[table_index], sheet, &allocation.bookings, layout);
    }

    write_workbook(&config.output_path, &allotment_tables, &bookings_table, &layout.bookings_sheet_name)?;

    let summary = AllocationSummary::from_allocation(&allocation);
    if let Some(summary_path) = &config.summary_path {
        write_summary_file(summary_path, &summary)?;
    }

    Ok(RunReport { summary, warnings, output_path: config.output_path.clone(), bookings: bookings_table, allotments: allotment_tables })
}
