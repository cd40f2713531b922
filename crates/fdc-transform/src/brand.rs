//! Outer join of branded product attributes onto the consolidated table.

use std::collections::BTreeSet;

use fdc_model::{BrandTable, CellValue, ConsolidatedTable, FOOD_ID_COLUMN, TableColumn, label_key};

use crate::error::{Result, TransformError};

/// A table with brand columns appended.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandJoin {
    pub table: ConsolidatedTable,
    /// Food ids that were only present in the brand table.
    pub brand_only_rows: usize,
}

/// Appends the brand columns to `table`, keyed on food id.
///
/// The join is outer. Foods without brand data get missing brand cells. Brand
/// ids unknown to `table` become new rows whose other cells are missing.
pub fn join_brand_data(table: ConsolidatedTable, brands: &BrandTable) -> Result<BrandJoin> {
    let (mut columns, mut rows) = table.into_parts();
    let prior_width = columns.len();

    let mut taken: BTreeSet<String> = columns
        .iter()
        .map(|column| label_key(&column.label))
        .chain([label_key(FOOD_ID_COLUMN)])
        .collect();
    for name in brands.columns() {
        if !taken.insert(label_key(name)) {
            return Err(TransformError::DuplicateColumn {
                label: name.clone(),
            });
        }
        columns.push(TableColumn::brand(name.as_str()));
    }
    let brand_width = brands.columns().len();

    for cells in rows.values_mut() {
        cells.resize(prior_width + brand_width, CellValue::Missing);
    }

    let mut brand_only_rows = 0;
    for (food_id, values) in brands.rows() {
        let cells = rows.entry(food_id).or_insert_with(|| {
            brand_only_rows += 1;
            vec![CellValue::Missing; prior_width + brand_width]
        });
        for (offset, value) in values.iter().enumerate() {
            cells[prior_width + offset] = value.clone().into();
        }
    }

    if brand_only_rows > 0 {
        tracing::warn!(
            brand_only_rows,
            "foods present only in brand data were added without description or nutrients"
        );
    }

    Ok(BrandJoin {
        table: ConsolidatedTable::from_parts(columns, rows),
        brand_only_rows,
    })
}
