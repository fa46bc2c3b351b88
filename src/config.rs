use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::loader::parser::parse_json_file;

/// Column names and header positions of the two input spreadsheets.
///
/// Every field has a default matching the usual Book1 / Book2 layout, so a
/// JSON layout file only has to list the columns that differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    // Bookings table (Book1)
    pub booking_id: String,
    pub person_count: String,
    pub admin_name: String,
    pub age: String,
    pub whatsapp_no: String,
    pub allocation_status: String,
    pub allotted_slot: String,
    /// 0-based row holding the column names of the bookings table.
    pub bookings_header_row: usize,

    // Allotment sheets (Book2)
    pub target: String,
    pub slot_id: String,
    pub slot_status: String,
    /// 0-based row holding the column names of every allotment sheet.
    pub allotments_header_row: usize,

    /// Name of the sheet the bookings table is written to in the output workbook.
    pub bookings_sheet_name: String,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            booking_id: "Unique Id".to_string(),
            person_count: "No. of Person".to_string(),
            admin_name: "Group Admin Name".to_string(),
            age: "Age".to_string(),
            whatsapp_no: "WhatsApp No".to_string(),
            allocation_status: "Allocation Status".to_string(),
            allotted_slot: "Allotted Dhaja No".to_string(),
            bookings_header_row: 0,
            target: "test".to_string(),
            slot_id: "New Dhaja No.".to_string(),
            slot_status: "BOOKING".to_string(),
            allotments_header_row: 1,
            bookings_sheet_name: "Bookings".to_string(),
        }
    }
}

impl ColumnLayout {
    /// Reads a layout from a JSON file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let layout: ColumnLayout = parse_json_file(path)?;
        log::info!("Column layout loaded from '{}'.", path.display());
        Ok(layout)
    }

    /// Name of the "Booking N Id" column written to allotment sheets (N is 1-based).
    pub fn booking_id_column(n: usize) -> String {
        format!("Booking {} Id", n)
    }

    /// Name of the "Booking N Persons" column written to allotment sheets (N is 1-based).
    pub fn booking_persons_column(n: usize) -> String {
        format!("Booking {} Persons", n)
    }
}

/// Everything one allocation run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub bookings_path: PathBuf,
    pub allotments_path: PathBuf,
    pub output_path: PathBuf,
    /// Optional `;`-separated per-sheet summary.
    pub summary_path: Option<PathBuf>,
    pub layout: ColumnLayout,
}

impl RunConfig {
    pub fn new(bookings_path: impl Into<PathBuf>, allotments_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            bookings_path: bookings_path.into(),
            allotments_path: allotments_path.into(),
            output_path: output_path.into(),
            summary_path: None,
            layout: ColumnLayout::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let layout: ColumnLayout = serde_json::from_str(r#"{ "target": "Persons", "allotments_header_row": 0 }"#).unwrap();

        assert_eq!(layout.target, "Persons");
        assert_eq!(layout.allotments_header_row, 0);
        assert_eq!(layout.person_count, "No. of Person");
        assert_eq!(layout.slot_id, "New Dhaja No.");
    }

    #[test]
    fn booking_column_names() {
        assert_eq!(ColumnLayout::booking_id_column(2), "Booking 2 Id");
        assert_eq!(ColumnLayout::booking_persons_column(1), "Booking 1 Persons");
    }
}
