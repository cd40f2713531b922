//! Typed loaders for the four FoodData Central source tables.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;

use fdc_model::{
    BrandTable, DATA_TYPE_COLUMN, DESCRIPTION_COLUMN, FOOD_ID_COLUMN, FoodId, FoodRecord,
    FoodTable, MeasurementRecord, NutrientDefinition, NutrientDefinitions, NutrientId,
    PUBLICATION_DATE_COLUMN,
};

use crate::csv::{Table, TableRow, TableSpec, read_table};
use crate::error::{IngestError, Result};

/// Key column of `nutrient.csv`.
pub const NUTRIENT_ID_COLUMN: &str = "id";
/// Nutrient reference column of `food_nutrient.csv`.
pub const MEASUREMENT_NUTRIENT_COLUMN: &str = "nutrient_id";
/// Amount column of `food_nutrient.csv`.
pub const AMOUNT_COLUMN: &str = "amount";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

fn invalid(table: &Table, row: &TableRow, column: usize, value: &str) -> IngestError {
    IngestError::InvalidValue {
        column: table.columns()[column].clone(),
        value: value.to_string(),
        line: row.line,
        path: table.path().to_path_buf(),
    }
}

fn duplicate(table: &Table, row: &TableRow, key: impl ToString) -> IngestError {
    IngestError::DuplicateKey {
        column: table.primary_key().to_string(),
        key: key.to_string(),
        line: row.line,
        path: table.path().to_path_buf(),
    }
}

fn required_index(table: &Table, column: &str) -> Result<usize> {
    table.column_index(column).ok_or_else(|| IngestError::Schema {
        column: column.to_string(),
        path: table.path().to_path_buf(),
    })
}

/// 2^63, the first float above the `i64` range.
const I64_FLOAT_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn parse_id(table: &Table, row: &TableRow, column: usize) -> Result<i64> {
    let raw = table.cell(row, column);
    raw.parse::<i64>()
        .ok()
        // Some exports write integer keys as "1234.0".
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|value| {
                    value.fract() == 0.0 && (-I64_FLOAT_BOUND..I64_FLOAT_BOUND).contains(value)
                })
                .map(|value| value as i64)
        })
        .ok_or_else(|| invalid(table, row, column, raw))
}

fn parse_amount(table: &Table, row: &TableRow, column: usize) -> Result<Option<f64>> {
    let raw = table.cell(row, column);
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| invalid(table, row, column, raw))
}

fn parse_date(table: &Table, row: &TableRow, column: usize) -> Result<Option<NaiveDate>> {
    let raw = table.cell(row, column);
    if raw.is_empty() {
        return Ok(None);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(Some)
        .ok_or_else(|| invalid(table, row, column, raw))
}

fn optional_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Loads `food.csv`: `fdc_id`, `description`, `data_type` and, when present,
/// `publication_date`.
pub fn load_foods(path: &Path) -> Result<FoodTable> {
    let spec = TableSpec::new(FOOD_ID_COLUMN)
        .with_columns([DESCRIPTION_COLUMN, DATA_TYPE_COLUMN])
        .with_optional_columns([PUBLICATION_DATE_COLUMN]);
    let table = read_table(path, &spec)?;
    decode_foods(&table)
}

/// Decodes a loaded food table. Food ids must be unique.
pub fn decode_foods(table: &Table) -> Result<FoodTable> {
    let description = required_index(table, DESCRIPTION_COLUMN)?;
    let data_type = required_index(table, DATA_TYPE_COLUMN)?;
    let publication_date = table.column_index(PUBLICATION_DATE_COLUMN);

    let mut seen = BTreeSet::new();
    let mut records = Vec::with_capacity(table.len());
    for row in table.rows() {
        let fdc_id = FoodId::new(parse_id(table, row, 0)?);
        if !seen.insert(fdc_id) {
            return Err(duplicate(table, row, fdc_id));
        }
        let published = match publication_date {
            Some(idx) => parse_date(table, row, idx)?,
            None => None,
        };
        records.push(FoodRecord {
            fdc_id,
            description: table.cell(row, description).to_string(),
            data_type: table.cell(row, data_type).to_string(),
            publication_date: published,
        });
    }
    Ok(FoodTable::new(records, publication_date.is_some()))
}

/// Loads `food_nutrient.csv` as `(fdc_id, nutrient_id, amount)` triples in source order.
///
/// Empty amounts are kept as measurements with a missing value.
pub fn load_measurements(path: &Path) -> Result<Vec<MeasurementRecord>> {
    let spec = TableSpec::new(FOOD_ID_COLUMN)
        .with_columns([MEASUREMENT_NUTRIENT_COLUMN, AMOUNT_COLUMN]);
    let table = read_table(path, &spec)?;
    decode_measurements(&table)
}

pub fn decode_measurements(table: &Table) -> Result<Vec<MeasurementRecord>> {
    let nutrient = required_index(table, MEASUREMENT_NUTRIENT_COLUMN)?;
    let amount = required_index(table, AMOUNT_COLUMN)?;
    table
        .rows()
        .iter()
        .map(|row| {
            Ok(MeasurementRecord {
                food_id: FoodId::new(parse_id(table, row, 0)?),
                nutrient_id: NutrientId::new(parse_id(table, row, nutrient)?),
                amount: parse_amount(table, row, amount)?,
            })
        })
        .collect()
}

/// Loads `nutrient.csv` into a lookup by nutrient id.
pub fn load_nutrients(path: &Path) -> Result<NutrientDefinitions> {
    let spec = TableSpec::new(NUTRIENT_ID_COLUMN).with_columns(["name", "unit_name"]);
    let table = read_table(path, &spec)?;
    decode_nutrients(&table)
}

pub fn decode_nutrients(table: &Table) -> Result<NutrientDefinitions> {
    let name = required_index(table, "name")?;
    let unit_name = required_index(table, "unit_name")?;
    let mut definitions = NutrientDefinitions::new();
    for row in table.rows() {
        let id = NutrientId::new(parse_id(table, row, 0)?);
        let definition = NutrientDefinition {
            id,
            name: table.cell(row, name).to_string(),
            unit_name: table.cell(row, unit_name).to_string(),
        };
        if definitions.insert(id, definition).is_some() {
            return Err(duplicate(table, row, id));
        }
    }
    Ok(definitions)
}

/// Brand value columns for a request: the key is dropped and repeats are collapsed.
pub fn brand_value_columns(requested: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(requested.len());
    for name in requested {
        let name = name.trim();
        if name.is_empty() || name == FOOD_ID_COLUMN || columns.iter().any(|c| c == name) {
            continue;
        }
        columns.push(name.to_string());
    }
    columns
}

/// Loads the requested columns of `branded_food.csv`, keyed by food id.
pub fn load_brands(path: &Path, columns: &[String]) -> Result<BrandTable> {
    let columns = brand_value_columns(columns);
    let spec = TableSpec::new(FOOD_ID_COLUMN).with_columns(columns.iter().cloned());
    let table = read_table(path, &spec)?;
    decode_brands(&table, &columns)
}

pub fn decode_brands(table: &Table, columns: &[String]) -> Result<BrandTable> {
    let indices = columns
        .iter()
        .map(|column| required_index(table, column))
        .collect::<Result<Vec<_>>>()?;
    let mut brands = BrandTable::new(columns.to_vec());
    for row in table.rows() {
        let fdc_id = FoodId::new(parse_id(table, row, 0)?);
        let values = indices
            .iter()
            .map(|idx| optional_text(table.cell(row, *idx)))
            .collect();
        if brands.insert(fdc_id, values).is_some() {
            return Err(duplicate(table, row, fdc_id));
        }
    }
    Ok(brands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_value_columns_drop_key_and_repeats() {
        let requested = vec![
            "brand_owner".to_string(),
            "fdc_id".to_string(),
            " ingredients ".to_string(),
            "brand_owner".to_string(),
            String::new(),
        ];
        assert_eq!(
            brand_value_columns(&requested),
            vec!["brand_owner".to_string(), "ingredients".to_string()]
        );
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(""), None);
        assert_eq!(optional_text("Acme"), Some("Acme".to_string()));
    }
}
