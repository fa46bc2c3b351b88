pub mod summary_writer;
pub mod workbook_writer;
