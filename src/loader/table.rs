//! Untyped spreadsheet data, as read from and written to workbooks.

use std::fmt;

use crate::domain::utils::headcount::{self, Headcount};

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Coerces the cell to a headcount; see [`crate::domain::utils::headcount`].
    pub fn to_headcount(&self) -> Headcount {
        match self {
            Cell::Empty => 0,
            Cell::Text(s) => headcount::from_text(s),
            Cell::Int(i) => headcount::from_int(*i),
            Cell::Float(f) => headcount::from_float(*f),
            Cell::Bool(b) => headcount::from_bool(*b),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Int(i) => write!(f, "{}", i),
            // Whole floats come from numeric id columns; print them without ".0".
            Cell::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One sheet: a header row and the data rows below it.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self { name: name.into(), headers, rows: Vec::new() }
    }

    /// Builds a table from a raw grid, taking `header_row` as the column names.
    ///
    /// Rows above the header are dropped. Blank header cells are named
    /// `Unnamed: <col>`. Every row is padded to the same width.
    pub fn from_grid(name: impl Into<String>, mut grid: Vec<Vec<Cell>>, header_row: usize) -> Self {
        let name = name.into();
        if grid.len() <= header_row {
            return Self::new(name, Vec::new());
        }

        let rows = grid.split_off(header_row + 1);
        let header_cells = grid.pop().unwrap_or_default();

        let width = rows.iter().map(Vec::len).chain(std::iter::once(header_cells.len())).max().unwrap_or(0);

        let headers = (0..width)
            .map(|col| match header_cells.get(col) {
                Some(cell) if !cell.is_empty() => cell.to_string().trim().to_string(),
                _ => format!("Unnamed: {}", col),
            })
            .collect();

        let mut table = Self::new(name, headers);
        for mut row in rows {
            row.resize(width, Cell::Empty);
            table.rows.push(row);
        }
        table
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column named `name` (surrounding whitespace ignored).
    pub fn column(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Index of the column named `name`, appending an empty column if it does not exist.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(col) = self.column(name) {
            return col;
        }
        self.headers.push(name.to_string());
        let width = self.headers.len();
        for row in &mut self.rows {
            row.resize(width, Cell::Empty);
        }
        width - 1
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }

    /// Cell text of `col` in `row`, empty when the column is absent.
    pub fn text(&self, row: usize, col: Option<usize>) -> String {
        col.map(|c| self.get(row, c).to_string()).unwrap_or_default()
    }

    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        let Some(cells) = self.rows.get_mut(row) else {
            log::warn!("Table '{}': write to missing row {} ignored.", self.name, row);
            return;
        };
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = value;
    }
}
