//! Integration tests for the export sink.

use std::fs::{self, File};

use chrono::NaiveDate;
use polars::prelude::{ParquetReader, SerReader};
use rusqlite::Connection;
use tempfile::TempDir;

use fdc_model::{CellValue, ConsolidatedTable, ExportFormat, FoodId, NutrientId, TableColumn};
use fdc_output::{ExportError, export_named, export_table, write_csv_to};

fn scenario_table() -> ConsolidatedTable {
    let mut protein = TableColumn::nutrient(NutrientId::new(100));
    protein.label = "Protein".to_string();
    let mut fat = TableColumn::nutrient(NutrientId::new(200));
    fat.label = "Fat".to_string();

    let mut table = ConsolidatedTable::new(vec![
        TableColumn::descriptive("description"),
        TableColumn::descriptive("data_type"),
        TableColumn::descriptive("publication_date"),
        protein,
        fat,
    ]);
    table.insert_row(
        FoodId::new(2),
        vec![
            CellValue::Text("Milk".to_string()),
            CellValue::Text("branded_food".to_string()),
            CellValue::Missing,
            CellValue::Number(3.2),
            CellValue::Missing,
        ],
    );
    table.insert_row(
        FoodId::new(1),
        vec![
            CellValue::Text("Apple".to_string()),
            CellValue::Text("sr_legacy_food".to_string()),
            CellValue::Date(NaiveDate::from_ymd_opt(2019, 4, 1).unwrap()),
            CellValue::Number(0.3),
            CellValue::Number(0.2),
        ],
    );
    table
}

#[test]
fn csv_layout() {
    let mut buffer = Vec::new();
    write_csv_to(&scenario_table(), &mut buffer).unwrap();
    let csv = String::from_utf8(buffer).unwrap();

    insta::assert_snapshot!(csv.trim_end(), @r"
    fdc_id,description,data_type,publication_date,Protein,Fat
    1,Apple,sr_legacy_food,2019-04-01,0.3,0.2
    2,Milk,branded_food,,3.2,
    ");
}

#[test]
fn every_format_writes_its_file() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("nested").join("exported_foods");
    let table = scenario_table();

    let written = export_table(&table, &base, &ExportFormat::ALL).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|file| file.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "exported_foods.csv",
            "exported_foods.json",
            "exported_foods.xml",
            "exported_foods.sqlite",
            "exported_foods.parquet",
        ]
    );
    for file in &written {
        assert!(file.path.is_file(), "{} missing", file.path.display());
    }
}

#[test]
fn empty_format_list_defaults_to_csv() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("exported_foods");

    let written = export_table(&scenario_table(), &base, &[]).unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(written[0].format, ExportFormat::Csv);
    assert!(dir.path().join("exported_foods.csv").is_file());
}

#[test]
fn json_is_index_oriented() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("foods");
    export_table(&scenario_table(), &base, &[ExportFormat::Json]).unwrap();

    let text = fs::read_to_string(dir.path().join("foods.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["1"]["Protein"], serde_json::json!(0.3));
    assert_eq!(value["1"]["publication_date"], serde_json::json!("2019-04-01"));
    assert_eq!(value["2"]["Fat"], serde_json::Value::Null);
    assert_eq!(value["2"]["description"], serde_json::json!("Milk"));

    // Column order is preserved in the document.
    let protein = text.find("\"Protein\"").unwrap();
    let fat = text.find("\"Fat\"").unwrap();
    assert!(protein < fat);
}

#[test]
fn sqlite_dump_round_trips_rows() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("foods");
    let path = dir.path().join("foods.sqlite");
    fs::write(&path, b"stale").unwrap();

    export_table(&scenario_table(), &base, &[ExportFormat::RelationalDump]).unwrap();

    let connection = Connection::open(&path).unwrap();
    let count: i64 = connection
        .query_row("SELECT COUNT(*) FROM foods", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
    let (description, fat): (String, Option<f64>) = connection
        .query_row(
            "SELECT description, \"Fat\" FROM foods WHERE fdc_id = 2",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(description, "Milk");
    assert_eq!(fat, None);
}

#[test]
fn parquet_file_reads_back() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("foods");
    export_table(&scenario_table(), &base, &[ExportFormat::BinarySerialized]).unwrap();

    let file = File::open(dir.path().join("foods.parquet")).unwrap();
    let df = ParquetReader::new(file).finish().unwrap();
    assert_eq!(df.shape(), (2, 6));
    assert_eq!(df.column("Fat").unwrap().null_count(), 1);
}

#[test]
fn unsupported_name_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("foods");

    let err = export_named(&scenario_table(), &base, &["csv", "xlsx"]).unwrap_err();

    assert!(matches!(err, ExportError::UnsupportedFormat(_)));
    assert!(err.to_string().contains("xlsx"));
    assert!(!dir.path().join("foods.csv").exists());
}

#[test]
fn legacy_names_are_accepted() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("foods");

    let written = export_named(&scenario_table(), &base, &["excel", "sql"]).unwrap();

    let formats: Vec<ExportFormat> = written.iter().map(|file| file.format).collect();
    assert_eq!(formats, [ExportFormat::Spreadsheet, ExportFormat::RelationalDump]);
}

fn case_clash_table() -> ConsolidatedTable {
    let mut energy = TableColumn::nutrient(NutrientId::new(100));
    energy.label = "Energy".to_string();
    let mut energy_kj = TableColumn::nutrient(NutrientId::new(200));
    energy_kj.label = "ENERGY".to_string();

    let mut table = ConsolidatedTable::new(vec![energy, energy_kj]);
    table.insert_row(FoodId::new(1), vec![CellValue::Number(52.0), CellValue::Number(218.0)]);
    table
}

#[test]
fn labels_differing_in_case_are_duplicates() {
    assert_eq!(case_clash_table().duplicate_labels(), ["ENERGY"]);
}

#[test]
fn failed_format_leaves_no_partial_file() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("foods");

    let err = export_table(
        &case_clash_table(),
        &base,
        &[ExportFormat::Csv, ExportFormat::RelationalDump],
    )
    .unwrap_err();

    assert!(matches!(err, ExportError::Sqlite { .. }));
    assert!(dir.path().join("foods.csv").is_file());
    assert!(!dir.path().join("foods.sqlite").exists());
}
