//! Wide nutrient matrix produced by pivoting measurements.

use std::collections::{BTreeMap, BTreeSet};

use crate::ids::{FoodId, NutrientId};

/// Sparse food-id x nutrient-id matrix of amounts.
///
/// A food id is a row only if at least one measurement named it. A pair with
/// no measurement, or a measurement with an empty amount, reads as `None`
/// (missing), never as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutrientMatrix {
    rows: BTreeMap<FoodId, BTreeMap<NutrientId, Option<f64>>>,
    nutrient_ids: BTreeSet<NutrientId>,
}

impl NutrientMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the amount for a pair. Returns `false` if the pair was already set,
    /// in which case the stored amount is left untouched.
    pub fn insert(&mut self, food_id: FoodId, nutrient_id: NutrientId, amount: Option<f64>) -> bool {
        let row = self.rows.entry(food_id).or_default();
        if row.contains_key(&nutrient_id) {
            return false;
        }
        row.insert(nutrient_id, amount);
        self.nutrient_ids.insert(nutrient_id);
        true
    }

    /// Amount for a pair; `None` is the missing marker.
    pub fn get(&self, food_id: FoodId, nutrient_id: NutrientId) -> Option<f64> {
        self.rows
            .get(&food_id)
            .and_then(|row| row.get(&nutrient_id))
            .copied()
            .flatten()
    }

    pub fn contains_food(&self, food_id: FoodId) -> bool {
        self.rows.contains_key(&food_id)
    }

    /// Food ids in ascending order.
    pub fn food_ids(&self) -> impl Iterator<Item = FoodId> + '_ {
        self.rows.keys().copied()
    }

    /// Union of all nutrient ids, ascending.
    pub fn nutrient_ids(&self) -> &BTreeSet<NutrientId> {
        &self.nutrient_ids
    }

    /// Dense row for a food over the full nutrient column set.
    pub fn dense_row(&self, food_id: FoodId) -> Option<Vec<Option<f64>>> {
        let row = self.rows.get(&food_id)?;
        Some(
            self.nutrient_ids
                .iter()
                .map(|id| row.get(id).copied().flatten())
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.nutrient_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
