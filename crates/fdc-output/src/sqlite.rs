//! Relational dump into a SQLite database.

use std::fs;
use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

use fdc_model::{CellValue, ConsolidatedTable, FOOD_ID_COLUMN, TableColumn};

use crate::error::{ExportError, Result};

/// Name of the table holding the consolidated rows.
pub const TABLE_NAME: &str = "foods";

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_type(column: &TableColumn) -> &'static str {
    if column.key.is_nutrient() { "REAL" } else { "TEXT" }
}

fn sql_value(cell: &CellValue) -> Value {
    match cell {
        CellValue::Missing => Value::Null,
        CellValue::Number(value) => Value::Real(*value),
        other => Value::Text(other.to_string()),
    }
}

/// `CREATE TABLE` statement for the table layout.
pub fn create_statement(table: &ConsolidatedTable) -> String {
    let mut definitions = vec![format!("{} INTEGER PRIMARY KEY", quote_identifier(FOOD_ID_COLUMN))];
    definitions.extend(
        table
            .columns()
            .iter()
            .map(|column| format!("{} {}", quote_identifier(&column.label), column_type(column))),
    );
    format!(
        "CREATE TABLE {} ({})",
        quote_identifier(TABLE_NAME),
        definitions.join(", ")
    )
}

fn insert_statement(table: &ConsolidatedTable) -> String {
    let placeholders: Vec<String> = (1..=table.column_count() + 1)
        .map(|idx| format!("?{idx}"))
        .collect();
    format!(
        "INSERT INTO {} VALUES ({})",
        quote_identifier(TABLE_NAME),
        placeholders.join(", ")
    )
}

fn write_rows(connection: &mut Connection, table: &ConsolidatedTable) -> rusqlite::Result<()> {
    let transaction = connection.transaction()?;
    transaction.execute(&create_statement(table), [])?;
    {
        let mut insert = transaction.prepare(&insert_statement(table))?;
        for (food_id, cells) in table.rows() {
            let mut values = Vec::with_capacity(cells.len() + 1);
            values.push(Value::Integer(food_id.get()));
            values.extend(cells.iter().map(sql_value));
            insert.execute(params_from_iter(values))?;
        }
    }
    transaction.commit()
}

/// Writes the table into a fresh database at `path`, replacing any existing file.
pub fn write_sqlite(table: &ConsolidatedTable, path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| ExportError::io(path, e))?;
    }
    let sqlite_error = |source| ExportError::Sqlite {
        path: path.to_path_buf(),
        source,
    };
    let mut connection = Connection::open(path).map_err(sqlite_error)?;
    write_rows(&mut connection, table).map_err(sqlite_error)
}
