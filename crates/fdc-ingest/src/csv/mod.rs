//! CSV reading utilities.

mod header;
mod reader;

pub use header::CsvHeaders;
pub use reader::{Table, TableRow, TableSpec, load_table, read_table};
