use rust_xlsxwriter::{Workbook, Worksheet};
use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::loader::table::{Cell, Table};

/// Excel's limit on sheet name length.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Writes the allotment tables followed by the bookings table into one `.xlsx` workbook.
///
/// Every sheet gets an autofilter over its used range. If the bookings sheet
/// name is already taken by an allotment sheet, a numeric suffix is added.
pub fn write_workbook(path: &Path, allotments: &[Table], bookings: &Table, bookings_sheet_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let mut used_names = HashSet::new();

    for table in allotments {
        let name = unique_sheet_name(&table.name, &mut used_names);
        write_table(workbook.add_worksheet(), &name, table)?;
    }

    let name = unique_sheet_name(bookings_sheet_name, &mut used_names);
    if name != bookings_sheet_name {
        log::warn!("Sheet name '{}' already used; bookings written to '{}'.", bookings_sheet_name, name);
    }
    write_table(workbook.add_worksheet(), &name, bookings)?;

    workbook.save(path)?;
    log::info!("Workbook written to '{}' ({} sheets).", path.display(), allotments.len() + 1);

    Ok(())
}

fn write_table(worksheet: &mut Worksheet, name: &str, table: &Table) -> Result<()> {
    worksheet.set_name(name)?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col as u16, cell)?;
        }
    }

    if !table.headers.is_empty() {
        worksheet.autofilter(0, 0, table.row_count() as u32, (table.headers.len() - 1) as u16)?;
    }

    Ok(())
}

fn write_cell(ws: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<()> {
    match cell {
        Cell::Empty => { /* Leave cell empty */ }
        Cell::Text(s) => {
            ws.write_string(row, col, s)?;
        }
        Cell::Int(i) => {
            ws.write_number(row, col, *i as f64)?;
        }
        Cell::Float(f) => {
            ws.write_number(row, col, *f)?;
        }
        Cell::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

/// Returns `name` (truncated to Excel's limit) or `name (n)` if that is already used.
fn unique_sheet_name(name: &str, used: &mut HashSet<String>) -> String {
    let base: String = name.chars().take(MAX_SHEET_NAME_LEN).collect();
    let mut candidate = base.clone();
    let mut n = 2;
    // Excel compares sheet names case-insensitively.
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!(" ({})", n);
        let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
        candidate = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
        n += 1;
    }
    used.insert(candidate.to_lowercase());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_names_are_made_unique() {
        let mut used = HashSet::new();
        assert_eq!(unique_sheet_name("Bookings", &mut used), "Bookings");
        assert_eq!(unique_sheet_name("bookings", &mut used), "bookings (2)");
        assert_eq!(unique_sheet_name("Bookings", &mut used), "Bookings (3)");
    }

    #[test]
    fn long_sheet_names_are_truncated() {
        let mut used = HashSet::new();
        let long = "A".repeat(40);
        assert_eq!(unique_sheet_name(&long, &mut used).len(), MAX_SHEET_NAME_LEN);
        assert_eq!(unique_sheet_name(&long, &mut used), format!("{} (2)", "A".repeat(27)));
    }
}
