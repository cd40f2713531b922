//! Delimited text export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fdc_model::{ConsolidatedTable, FOOD_ID_COLUMN};

use crate::error::{ExportError, Result};

/// Writes the table as CSV: `fdc_id` first, then every column label.
/// Missing cells are written as empty fields.
pub fn write_csv_to<W: Write>(table: &ConsolidatedTable, writer: W) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![FOOD_ID_COLUMN];
    header.extend(table.labels());
    csv.write_record(&header)?;

    for (food_id, cells) in table.rows() {
        let mut record = Vec::with_capacity(cells.len() + 1);
        record.push(food_id.to_string());
        record.extend(cells.iter().map(ToString::to_string));
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_csv(table: &ConsolidatedTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    write_csv_to(table, BufWriter::new(file)).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })
}
