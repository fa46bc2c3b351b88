use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse column layout JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to read CSV input: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to read workbook: {0}")]
    WorkbookReadError(#[from] calamine::XlsxError),

    #[error("Failed to write workbook: {0}")]
    WorkbookWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Unsupported spreadsheet format for '{0}' (expected .xlsx or .csv)")]
    UnsupportedFormat(String),

    #[error("Table '{table}' has no '{column}' column")]
    MissingColumn { table: String, column: String },

    #[error("Workbook '{0}' contains no sheets")]
    EmptyWorkbook(String),
}

pub type Result<T> = std::result::Result<T, Error>;
