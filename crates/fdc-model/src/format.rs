//! Export formats understood by the output sink.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    Csv,
    Json,
    /// SpreadsheetML 2003 workbook.
    Spreadsheet,
    /// SQLite database.
    RelationalDump,
    /// Apache Parquet.
    BinarySerialized,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Spreadsheet,
        ExportFormat::RelationalDump,
        ExportFormat::BinarySerialized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Spreadsheet => "spreadsheet",
            ExportFormat::RelationalDump => "relational-dump",
            ExportFormat::BinarySerialized => "binary-serialized",
        }
    }

    /// File extension appended to the export base path (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Spreadsheet => "xml",
            ExportFormat::RelationalDump => "sqlite",
            ExportFormat::BinarySerialized => "parquet",
        }
    }

    fn supported_names() -> String {
        ExportFormat::ALL
            .iter()
            .map(|format| format.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested export format the sink does not implement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported export format \"{requested}\" (supported: {supported})")]
pub struct UnsupportedFormatError {
    pub requested: String,
    pub supported: String,
}

impl UnsupportedFormatError {
    pub fn new(requested: impl Into<String>) -> Self {
        Self {
            requested: requested.into(),
            supported: ExportFormat::supported_names(),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = UnsupportedFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "spreadsheet" | "excel" => Ok(ExportFormat::Spreadsheet),
            "relational-dump" | "sql" | "sqlite" => Ok(ExportFormat::RelationalDump),
            "binary-serialized" | "pickle" | "parquet" => Ok(ExportFormat::BinarySerialized),
            _ => Err(UnsupportedFormatError::new(s)),
        }
    }
}
