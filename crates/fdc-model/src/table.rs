//! The denormalized, one-row-per-food output table.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use crate::ids::{FoodId, NutrientId};
use crate::records::FOOD_ID_COLUMN;

/// A single cell of the consolidated table.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// No value recorded. Distinct from a numeric zero.
    #[default]
    Missing,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Number)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Text)
    }
}

impl From<Option<NaiveDate>> for CellValue {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Date)
    }
}

/// Renders the cell as delimited-text content; missing cells render empty.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

/// Comparison key for column labels.
///
/// Exported relational columns are matched without regard to case, so two
/// labels that fold to the same key cannot coexist in one table.
pub fn label_key(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Identity of a column, independent of its display label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnKey {
    /// A food descriptor loaded from the food table.
    Descriptive(String),
    /// A pivoted nutrient column.
    Nutrient(NutrientId),
    /// A column merged from the brand table.
    Brand(String),
}

impl ColumnKey {
    pub fn is_nutrient(&self) -> bool {
        matches!(self, ColumnKey::Nutrient(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub key: ColumnKey,
    pub label: String,
}

impl TableColumn {
    pub fn descriptive(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: ColumnKey::Descriptive(name.clone()),
            label: name,
        }
    }

    /// Nutrient column labelled with its numeric id.
    pub fn nutrient(id: NutrientId) -> Self {
        Self {
            key: ColumnKey::Nutrient(id),
            label: id.to_string(),
        }
    }

    pub fn brand(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: ColumnKey::Brand(name.clone()),
            label: name,
        }
    }
}

/// One row per food id, ordered by food id, with an ordered column list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsolidatedTable {
    columns: Vec<TableColumn>,
    rows: BTreeMap<FoodId, Vec<CellValue>>,
}

impl ConsolidatedTable {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: BTreeMap::new(),
        }
    }

    pub fn from_parts(columns: Vec<TableColumn>, rows: BTreeMap<FoodId, Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|(id, mut cells)| {
                cells.resize(width, CellValue::Missing);
                (id, cells)
            })
            .collect();
        Self { columns, rows }
    }

    pub fn into_parts(self) -> (Vec<TableColumn>, BTreeMap<FoodId, Vec<CellValue>>) {
        (self.columns, self.rows)
    }

    /// Insert or replace a row. Short rows are padded with missing cells.
    pub fn insert_row(&mut self, food_id: FoodId, mut cells: Vec<CellValue>) -> Option<Vec<CellValue>> {
        cells.resize(self.columns.len(), CellValue::Missing);
        self.rows.insert(food_id, cells)
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.label.as_str())
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.label == label)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn nutrient_column_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|column| column.key.is_nutrient())
            .count()
    }

    pub fn row(&self, food_id: FoodId) -> Option<&[CellValue]> {
        self.rows.get(&food_id).map(Vec::as_slice)
    }

    /// Rows in ascending food id order.
    pub fn rows(&self) -> impl Iterator<Item = (FoodId, &[CellValue])> {
        self.rows.iter().map(|(id, cells)| (*id, cells.as_slice()))
    }

    pub fn food_ids(&self) -> impl Iterator<Item = FoodId> + '_ {
        self.rows.keys().copied()
    }

    pub fn contains_food(&self, food_id: FoodId) -> bool {
        self.rows.contains_key(&food_id)
    }

    /// Cell lookup by food id and column label.
    pub fn value(&self, food_id: FoodId, label: &str) -> Option<&CellValue> {
        let idx = self.column_index(label)?;
        self.rows.get(&food_id).and_then(|cells| cells.get(idx))
    }

    /// Labels that clash with an earlier column or with the food id column
    /// every export prepends, in first-seen order. Labels differing only in
    /// case clash.
    pub fn duplicate_labels(&self) -> Vec<String> {
        let mut seen = BTreeSet::from([label_key(FOOD_ID_COLUMN)]);
        let mut reported = BTreeSet::new();
        let mut duplicates = Vec::new();
        for column in &self.columns {
            let key = label_key(&column.label);
            if !seen.insert(key.clone()) && reported.insert(key) {
                duplicates.push(column.label.clone());
            }
        }
        duplicates
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
