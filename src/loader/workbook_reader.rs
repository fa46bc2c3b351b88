//! Reads spreadsheet files into [`Table`]s.
//!
//! `.xlsx` / `.xlsm` workbooks are read with calamine (one table per sheet,
//! in workbook order); `.csv` files are read with the csv crate as a single
//! table named after the file stem.

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use std::path::Path;

use crate::error::{Error, Result};
use crate::loader::table::{Cell, Table};

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) if s.trim().is_empty() => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            other => Cell::Text(other.to_string()),
        }
    }
}

enum SpreadsheetFormat {
    Xlsx,
    Csv,
}

fn detect_format(path: &Path) -> Result<SpreadsheetFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("xlsx") | Some("xlsm") => Ok(SpreadsheetFormat::Xlsx),
        Some("csv") => Ok(SpreadsheetFormat::Csv),
        _ => Err(Error::UnsupportedFormat(path.display().to_string())),
    }
}

/// Reads every sheet of `path`, using `header_row` (0-based) as the column names.
///
/// Fails with `Error::EmptyWorkbook` if the file has no sheets at all.
pub fn read_tables(path: &Path, header_row: usize) -> Result<Vec<Table>> {
    if !path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("'{}' does not exist", path.display()),
        )));
    }

    let tables = match detect_format(path)? {
        SpreadsheetFormat::Xlsx => read_xlsx(path, header_row)?,
        SpreadsheetFormat::Csv => vec![read_csv(path, header_row)?],
    };

    if tables.is_empty() {
        return Err(Error::EmptyWorkbook(path.display().to_string()));
    }

    for table in &tables {
        log::debug!("Read sheet '{}' from '{}': {} columns, {} rows.", table.name, path.display(), table.headers.len(), table.row_count());
    }

    Ok(tables)
}

/// Reads the first sheet of `path`.
pub fn read_first_table(path: &Path, header_row: usize) -> Result<Table> {
    let mut tables = read_tables(path, header_row)?;
    if tables.len() > 1 {
        log::info!("'{}' has {} sheets; only the first ('{}') is used.", path.display(), tables.len(), tables[0].name);
    }
    Ok(tables.swap_remove(0))
}

fn read_xlsx(path: &Path, header_row: usize) -> Result<Vec<Table>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let mut tables = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet_name)?;
        tables.push(Table::from_grid(sheet_name, range_to_grid(&range), header_row));
    }
    Ok(tables)
}

/// Converts a calamine range to a grid anchored at cell A1.
///
/// calamine ranges start at the first used cell, so leading empty rows and
/// columns are put back to keep header row numbers absolute.
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let Some((first_row, first_col)) = range.start() else {
        return Vec::new();
    };

    let mut grid: Vec<Vec<Cell>> = vec![Vec::new(); first_row as usize];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; first_col as usize];
        cells.extend(row.iter().map(Cell::from));
        grid.push(cells);
    }
    grid
}

fn read_csv(path: &Path, header_row: usize) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).from_path(path)?;

    let mut grid = Vec::new();
    for result in reader.records() {
        let record = result?;
        grid.push(record.iter().map(|field| if field.trim().is_empty() { Cell::Empty } else { Cell::Text(field.to_string()) }).collect());
    }

    let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Sheet1").to_string();
    Ok(Table::from_grid(name, grid, header_row))
}
