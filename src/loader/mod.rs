pub mod mapping;
pub mod parser;
pub mod table;
pub mod workbook_reader;
