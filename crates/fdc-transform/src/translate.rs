//! Relabel nutrient columns with their human-readable names.

use std::collections::{BTreeMap, BTreeSet};

use fdc_model::{
    CollisionPolicy, ColumnKey, ConsolidatedTable, ConsolidationWarning, FOOD_ID_COLUMN,
    NutrientDefinitions, NutrientId, label_key,
};

use crate::error::{Result, TransformError};

/// A relabelled table and what was noticed while relabelling it.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub table: ConsolidatedTable,
    pub warnings: Vec<ConsolidationWarning>,
}

/// Label given to a colliding nutrient column under [`CollisionPolicy::Suffix`].
pub fn suffixed_label(name: &str, nutrient_id: NutrientId) -> String {
    format!("{name} ({nutrient_id})")
}

/// Renames nutrient columns to the names in `definitions`.
///
/// Ids without a definition (or with a blank name) keep their numeric label.
/// Names shared by several nutrient columns, or equal to another column's
/// label or to `fdc_id`, are collisions; names are compared without regard to
/// case. Collisions are always reported, then either suffixed with the
/// nutrient id or rejected according to `policy`. Cell values and rows are not
/// touched.
pub fn translate_nutrients(
    table: ConsolidatedTable,
    definitions: &NutrientDefinitions,
    policy: CollisionPolicy,
) -> Result<Translation> {
    let (mut columns, rows) = table.into_parts();
    let mut warnings = Vec::new();

    // label key -> (column index, nutrient id, name) for every translatable column
    let mut groups: BTreeMap<String, Vec<(usize, NutrientId, String)>> = BTreeMap::new();
    let mut fixed_labels = BTreeSet::from([label_key(FOOD_ID_COLUMN)]);
    for (idx, column) in columns.iter().enumerate() {
        let ColumnKey::Nutrient(id) = column.key else {
            fixed_labels.insert(label_key(&column.label));
            continue;
        };
        match definitions.get(&id).map(|definition| definition.name.trim()) {
            Some(name) if !name.is_empty() => groups
                .entry(label_key(name))
                .or_default()
                .push((idx, id, name.to_string())),
            Some(_) => {
                tracing::debug!(nutrient_id = %id, "nutrient definition has a blank name");
                warnings.push(ConsolidationWarning::BlankNutrientName { nutrient_id: id });
                fixed_labels.insert(label_key(&column.label));
            }
            None => {
                tracing::debug!(nutrient_id = %id, "nutrient has no definition");
                warnings.push(ConsolidationWarning::UntranslatedNutrient { nutrient_id: id });
                fixed_labels.insert(label_key(&column.label));
            }
        }
    }

    for (key, mut members) in groups {
        if members.len() == 1 && !fixed_labels.contains(&key) {
            if let Some((idx, _, name)) = members.pop() {
                columns[idx].label = name;
            }
            continue;
        }

        let name = members[0].2.clone();
        let nutrient_ids: Vec<NutrientId> = members.iter().map(|(_, id, _)| *id).collect();
        if policy == CollisionPolicy::Reject {
            return Err(TransformError::NameCollision { name, nutrient_ids });
        }

        let resolved_labels: Vec<String> = members
            .iter()
            .map(|(_, id, member_name)| suffixed_label(member_name, *id))
            .collect();
        for ((idx, _, _), label) in members.iter().zip(&resolved_labels) {
            columns[*idx].label.clone_from(label);
        }
        tracing::warn!(
            name = %name,
            columns = nutrient_ids.len(),
            "nutrient name collision resolved with id suffixes"
        );
        warnings.push(ConsolidationWarning::NameCollision {
            name,
            nutrient_ids,
            resolved_labels,
        });
    }

    let table = ConsolidatedTable::from_parts(columns, rows);
    if let Some(label) = table.duplicate_labels().into_iter().next() {
        return Err(TransformError::DuplicateColumn { label });
    }
    Ok(Translation { table, warnings })
}
