//! Inner join of the food table with the nutrient matrix.

use std::collections::BTreeMap;

use fdc_model::{
    CellValue, ConsolidatedTable, FoodRecord, FoodTable, NutrientMatrix, TableColumn,
};

fn descriptive_cells(record: &FoodRecord, has_publication_date: bool) -> Vec<CellValue> {
    let mut cells = vec![
        CellValue::Text(record.description.clone()),
        CellValue::Text(record.data_type.clone()),
    ];
    if has_publication_date {
        cells.push(record.publication_date.into());
    }
    cells
}

/// Joins foods and nutrient rows on food id, keeping only ids present in both.
///
/// Descriptive columns come first in load order, then one column per nutrient
/// id in ascending order, labelled with the id. Rows are ordered by food id.
pub fn join_foods_with_nutrients(foods: &FoodTable, matrix: &NutrientMatrix) -> ConsolidatedTable {
    let mut columns: Vec<TableColumn> = foods
        .descriptive_columns()
        .into_iter()
        .map(TableColumn::descriptive)
        .collect();
    columns.extend(matrix.nutrient_ids().iter().copied().map(TableColumn::nutrient));

    let mut rows = BTreeMap::new();
    for record in &foods.records {
        let Some(amounts) = matrix.dense_row(record.fdc_id) else {
            continue;
        };
        let mut cells = descriptive_cells(record, foods.has_publication_date);
        cells.extend(amounts.into_iter().map(CellValue::from));
        rows.insert(record.fdc_id, cells);
    }

    tracing::debug!(
        foods = foods.len(),
        matrix_rows = matrix.row_count(),
        joined = rows.len(),
        "joined foods with nutrients"
    );
    ConsolidatedTable::from_parts(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fdc_model::{FoodId, NutrientId};

    fn food(id: i64, description: &str) -> FoodRecord {
        FoodRecord {
            fdc_id: FoodId::new(id),
            description: description.to_string(),
            data_type: "sr_legacy_food".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2019, 4, 1),
        }
    }

    fn matrix(entries: &[(i64, i64, f64)]) -> NutrientMatrix {
        let mut matrix = NutrientMatrix::new();
        for (food_id, nutrient_id, amount) in entries {
            matrix.insert(FoodId::new(*food_id), NutrientId::new(*nutrient_id), Some(*amount));
        }
        matrix
    }

    #[test]
    fn test_inner_join_drops_unmatched_ids() {
        let foods = FoodTable::new(vec![food(2, "Milk"), food(1, "Apple"), food(5, "Kale")], false);
        let matrix = matrix(&[(1, 100, 0.3), (2, 100, 3.2), (8, 200, 1.0)]);

        let table = join_foods_with_nutrients(&foods, &matrix);

        assert_eq!(table.food_ids().collect::<Vec<_>>(), [FoodId::new(1), FoodId::new(2)]);
        assert_eq!(table.labels().collect::<Vec<_>>(), ["description", "data_type", "100", "200"]);
        assert_eq!(
            table.value(FoodId::new(1), "description"),
            Some(&CellValue::Text("Apple".to_string()))
        );
        assert_eq!(table.value(FoodId::new(2), "100"), Some(&CellValue::Number(3.2)));
        assert_eq!(table.value(FoodId::new(2), "200"), Some(&CellValue::Missing));
    }

    #[test]
    fn test_publication_date_column_follows_source() {
        let foods = FoodTable::new(vec![food(1, "Apple")], true);
        let table = join_foods_with_nutrients(&foods, &matrix(&[(1, 100, 0.3)]));

        assert_eq!(table.column_index("publication_date"), Some(2));
        assert_eq!(
            table.value(FoodId::new(1), "publication_date"),
            Some(&CellValue::Date(NaiveDate::from_ymd_opt(2019, 4, 1).unwrap()))
        );
    }

    #[test]
    fn test_empty_matrix_yields_empty_table() {
        let foods = FoodTable::new(vec![food(1, "Apple")], false);
        let table = join_foods_with_nutrients(&foods, &NutrientMatrix::new());
        assert!(table.is_empty());
        assert_eq!(table.nutrient_column_count(), 0);
    }
}
