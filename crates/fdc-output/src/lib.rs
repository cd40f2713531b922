//! Export of consolidated FoodData Central tables.
//!
//! | Format | Extension | Writer |
//! |---|---|---|
//! | csv | `.csv` | [`write_csv`] |
//! | json | `.json` | [`write_json`] |
//! | spreadsheet | `.xml` | [`write_spreadsheet`] |
//! | relational-dump | `.sqlite` | [`write_sqlite`] |
//! | binary-serialized | `.parquet` | [`write_parquet`] |
//!
//! [`export_table`] writes any combination of them next to a base path.

mod csv;
mod error;
mod json;
mod parquet;
mod sink;
mod spreadsheet;
mod sqlite;

pub use self::csv::{write_csv, write_csv_to};
pub use error::{ExportError, Result};
pub use json::{write_json, write_json_to};
pub use self::parquet::{to_dataframe, write_parquet};
pub use sink::{ExportedFile, export_named, export_table, output_path, resolve_formats};
pub use spreadsheet::{write_spreadsheet, write_spreadsheet_to};
pub use sqlite::{TABLE_NAME, create_statement, write_sqlite};
