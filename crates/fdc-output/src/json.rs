//! Index-oriented JSON export.
//!
//! The document maps each food id to an object of `label -> value`:
//!
//! ```json
//! {"1": {"description": "Apple", "Protein": 0.3, "Fat": null}}
//! ```
//!
//! Column order follows the table; missing cells are `null`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use fdc_model::{CellValue, ConsolidatedTable, TableColumn};

use crate::error::{ExportError, Result};

struct IndexOriented<'a>(&'a ConsolidatedTable);

struct RowObject<'a> {
    columns: &'a [TableColumn],
    cells: &'a [CellValue],
}

struct JsonCell<'a>(&'a CellValue);

impl Serialize for IndexOriented<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let table = self.0;
        let mut map = serializer.serialize_map(Some(table.len()))?;
        for (food_id, cells) in table.rows() {
            let row = RowObject {
                columns: table.columns(),
                cells,
            };
            map.serialize_entry(&food_id.to_string(), &row)?;
        }
        map.end()
    }
}

impl Serialize for RowObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(&column.label, &JsonCell(cell))?;
        }
        map.end()
    }
}

impl Serialize for JsonCell<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.0 {
            CellValue::Missing => serializer.serialize_none(),
            CellValue::Text(value) => serializer.serialize_str(value),
            CellValue::Number(value) => serializer.serialize_f64(*value),
            CellValue::Date(value) => serializer.collect_str(&value.format("%Y-%m-%d")),
        }
    }
}

pub fn write_json_to<W: Write>(table: &ConsolidatedTable, writer: W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, &IndexOriented(table))
}

pub fn write_json(table: &ConsolidatedTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_json_to(table, &mut writer).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|e| ExportError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdc_model::{FoodId, NutrientId};

    #[test]
    fn test_column_order_and_nulls() {
        let mut table = ConsolidatedTable::new(vec![
            TableColumn::descriptive("description"),
            TableColumn::nutrient(NutrientId::new(300)),
            TableColumn::nutrient(NutrientId::new(100)),
        ]);
        table.insert_row(
            FoodId::new(2),
            vec![
                CellValue::Text("Milk".to_string()),
                CellValue::Missing,
                CellValue::Number(3.2),
            ],
        );

        let mut buffer = Vec::new();
        serde_json::to_writer(&mut buffer, &IndexOriented(&table)).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            r#"{"2":{"description":"Milk","300":null,"100":3.2}}"#
        );
    }
}
