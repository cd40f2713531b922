//! Columnar binary export (Apache Parquet via Polars).

use std::fs::File;
use std::path::Path;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, ParquetWriter, PolarsResult, Series};

use fdc_model::{CellValue, ConsolidatedTable, FOOD_ID_COLUMN, FoodId};

use crate::error::{ExportError, Result};

fn text_value(cell: &CellValue) -> Option<String> {
    if cell.is_missing() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Converts the table to a DataFrame: `fdc_id` as Int64, nutrient columns as
/// Float64 and every other column as String. Missing cells are null.
pub fn to_dataframe(table: &ConsolidatedTable) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.column_count() + 1);

    let ids: Vec<i64> = table.food_ids().map(FoodId::get).collect();
    columns.push(Series::new(FOOD_ID_COLUMN.into(), ids).into_column());

    for (idx, column) in table.columns().iter().enumerate() {
        let series = if column.key.is_nutrient() {
            let values: Vec<Option<f64>> = table
                .rows()
                .map(|(_, cells)| cells[idx].as_f64())
                .collect();
            Series::new(column.label.as_str().into(), values)
        } else {
            let values: Vec<Option<String>> = table
                .rows()
                .map(|(_, cells)| text_value(&cells[idx]))
                .collect();
            Series::new(column.label.as_str().into(), values)
        };
        columns.push(series.into_column());
    }

    DataFrame::new(columns)
}

pub fn write_parquet(table: &ConsolidatedTable, path: &Path) -> Result<()> {
    let polars_error = |source| ExportError::Polars {
        path: path.to_path_buf(),
        source,
    };
    let mut df = to_dataframe(table).map_err(polars_error)?;
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    ParquetWriter::new(file)
        .finish(&mut df)
        .map_err(polars_error)?;
    Ok(())
}
