//! Food data type exclusion.

use std::collections::BTreeSet;

use fdc_model::FoodTable;

/// Drops every food whose `data_type` is in `excluded`.
///
/// Matching is exact. Remaining rows keep their order; exclusions that match
/// nothing are ignored.
pub fn filter_food_types(foods: FoodTable, excluded: &BTreeSet<String>) -> FoodTable {
    if excluded.is_empty() {
        return foods;
    }
    let before = foods.len();
    let FoodTable {
        records,
        has_publication_date,
    } = foods;
    let records: Vec<_> = records
        .into_iter()
        .filter(|record| !excluded.contains(&record.data_type))
        .collect();

    tracing::debug!(
        before,
        after = records.len(),
        excluded = excluded.len(),
        "filtered food data types"
    );
    FoodTable::new(records, has_publication_date)
}
