use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use fdc_ingest::{IngestError, load_brands, load_foods, load_measurements, load_nutrients};
use fdc_model::{FoodId, NutrientId};

fn write_source(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write source");
    path
}

#[test]
fn loads_foods_with_publication_date() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "food.csv",
        "\"fdc_id\",\"data_type\",\"description\",\"food_category_id\",\"publication_date\"\n\
         \"1\",\"sr_legacy_food\",\"Apple, raw\",\"9\",\"2019-04-01\"\n\
         \"2\",\"branded_food\",\"Milk\",\"\",\"\"\n",
    );

    let foods = load_foods(&path).expect("load foods");
    assert!(foods.has_publication_date);
    assert_eq!(foods.len(), 2);
    assert_eq!(foods.records[0].fdc_id, FoodId::new(1));
    assert_eq!(foods.records[0].description, "Apple, raw");
    assert_eq!(foods.records[0].data_type, "sr_legacy_food");
    assert_eq!(
        foods.records[0].publication_date,
        NaiveDate::from_ymd_opt(2019, 4, 1)
    );
    assert_eq!(foods.records[1].publication_date, None);
}

#[test]
fn publication_date_column_is_optional() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "food.csv", "fdc_id,description,data_type\n5,Kale,foundation_food\n");

    let foods = load_foods(&path).expect("load foods");
    assert!(!foods.has_publication_date);
    assert_eq!(foods.records[0].publication_date, None);
}

#[test]
fn slash_dates_are_accepted() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "food.csv",
        "fdc_id,description,data_type,publication_date\n5,Kale,foundation_food,12/16/2019\n",
    );
    let foods = load_foods(&path).expect("load foods");
    assert_eq!(
        foods.records[0].publication_date,
        NaiveDate::from_ymd_opt(2019, 12, 16)
    );
}

#[test]
fn duplicate_food_id_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "food.csv",
        "fdc_id,description,data_type\n1,Apple,sr_legacy_food\n1,Pear,sr_legacy_food\n",
    );
    let err = load_foods(&path).unwrap_err();
    assert!(matches!(
        err,
        IngestError::DuplicateKey { ref key, line: 3, .. } if key == "1"
    ));
}

#[test]
fn food_source_without_data_type_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "food.csv", "fdc_id,description\n1,Apple\n");
    let err = load_foods(&path).unwrap_err();
    assert!(matches!(err, IngestError::Schema { ref column, .. } if column == "data_type"));
}

#[test]
fn loads_measurements_in_source_order() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "food_nutrient.csv",
        "id,fdc_id,nutrient_id,amount,data_points\n\
         10,2,203,3.2,1\n\
         11,1,203,0.3,1\n\
         12,1,204,,1\n",
    );

    let measurements = load_measurements(&path).expect("load measurements");
    assert_eq!(measurements.len(), 3);
    assert_eq!(measurements[0].food_id, FoodId::new(2));
    assert_eq!(measurements[0].nutrient_id, NutrientId::new(203));
    assert_eq!(measurements[0].amount, Some(3.2));
    assert_eq!(measurements[2].amount, None);
}

#[test]
fn non_numeric_amount_reports_line_and_column() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "food_nutrient.csv",
        "fdc_id,nutrient_id,amount\n1,203,0.3\n1,204,trace\n",
    );
    let err = load_measurements(&path).unwrap_err();
    match err {
        IngestError::InvalidValue {
            column,
            value,
            line,
            ..
        } => {
            assert_eq!(column, "amount");
            assert_eq!(value, "trace");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn float_written_ids_are_accepted_within_range() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "food_nutrient.csv",
        "fdc_id,nutrient_id,amount\n1234.0,203,0.3\n",
    );
    let measurements = load_measurements(&path).expect("load measurements");
    assert_eq!(measurements[0].food_id, FoodId::new(1234));
}

#[test]
fn out_of_range_ids_are_invalid() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "food_nutrient.csv",
        "fdc_id,nutrient_id,amount\n1e19,203,0.3\n2e19,203,0.4\n",
    );
    let err = load_measurements(&path).unwrap_err();
    match err {
        IngestError::InvalidValue {
            column,
            value,
            line,
            ..
        } => {
            assert_eq!(column, "fdc_id");
            assert_eq!(value, "1e19");
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn loads_nutrient_definitions() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "nutrient.csv",
        "id,name,unit_name,nutrient_nbr,rank\n1003,Protein,G,203,600\n1004,Total lipid (fat),G,204,800\n",
    );
    let definitions = load_nutrients(&path).expect("load nutrients");
    assert_eq!(definitions.len(), 2);
    let protein = &definitions[&NutrientId::new(1003)];
    assert_eq!(protein.name, "Protein");
    assert_eq!(protein.unit_name, "G");
}

#[test]
fn loads_requested_brand_columns() {
    let dir = TempDir::new().unwrap();
    let path = write_source(
        &dir,
        "branded_food.csv",
        "fdc_id,brand_owner,gtin_upc,ingredients,market_country\n\
         2,Dairy Co,0001,\"MILK, VITAMIN D3\",United States\n\
         99,Snack Inc,0002,,United States\n",
    );
    let columns = vec!["brand_owner".to_string(), "ingredients".to_string()];
    let brands = load_brands(&path, &columns).expect("load brands");

    assert_eq!(brands.columns(), ["brand_owner", "ingredients"]);
    assert_eq!(brands.len(), 2);
    assert_eq!(
        brands.get(FoodId::new(2)),
        Some(&[Some("Dairy Co".to_string()), Some("MILK, VITAMIN D3".to_string())][..])
    );
    assert_eq!(
        brands.get(FoodId::new(99)),
        Some(&[Some("Snack Inc".to_string()), None][..])
    );
}

#[test]
fn unknown_brand_column_is_schema_error() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "branded_food.csv", "fdc_id,brand_owner\n2,Dairy Co\n");
    let err = load_brands(&path, &["serving_size".to_string()]).unwrap_err();
    assert!(matches!(err, IngestError::Schema { ref column, .. } if column == "serving_size"));
}

#[test]
fn missing_source_is_reported_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nutrient.csv");
    let err = load_nutrients(&path).unwrap_err();
    match err {
        IngestError::SourceNotFound { path: reported } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
