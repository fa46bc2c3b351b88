use colored::Colorize;

use crate::RunReport;
use crate::loader::table::Table;

/// Prints the per-sheet outcome of a run to stdout.
pub fn print_summary(report: &RunReport) {
    let summary = &report.summary;

    println!("\n{}", "=== Allocation Summary ===".bold());
    for sheet in &summary.sheets {
        println!(
            "  {:<24} {:>4} slots | {} exact, {} +1, {} under, {} unfilled, {} skipped | {}/{} people",
            sheet.sheet,
            sheet.slots,
            sheet.exact.to_string().green(),
            sheet.overfill.to_string().cyan(),
            sheet.underfill.to_string().yellow(),
            sheet.unfilled.to_string().red(),
            sheet.skipped,
            sheet.people_placed,
            sheet.people_required
        );
    }

    for warning in &report.warnings {
        println!("  {} {}", "warning:".yellow().bold(), warning);
    }

    println!("  Slots: {} filled, {} unfilled.", summary.slots_filled().to_string().green(), summary.slots_unfilled().to_string().red());
    println!(
        "  Bookings: {} allocated, {} not allocated (of {}).",
        summary.bookings_allocated.to_string().green(),
        summary.bookings_not_allocated().to_string().red(),
        summary.bookings_total
    );
    println!("  Output: {}", report.output_path.display());
}

/// Prints the header and the first `rows` rows of `table`, tab separated.
pub fn print_preview(table: &Table, rows: usize) {
    println!("\n{}", format!("--- Preview of '{}' ---", table.name).bold());
    println!("{}", table.headers.join("\t"));
    for row in table.rows.iter().take(rows) {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        println!("{}", cells.join("\t"));
    }
    if table.row_count() > rows {
        println!("... {} more rows", table.row_count() - rows);
    }
}
