//! Header normalization and column projection.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Normalized header row of a delimited source.
#[derive(Debug, Clone)]
pub struct CsvHeaders {
    /// Normalized column names in source order.
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: raw
                .into_iter()
                .map(|value| normalize_header(value.as_ref()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if there are no columns, or all of them are blank.
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(String::is_empty)
    }

    /// Source index of the first column with this name.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }
}

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Normalizes a data cell by trimming surrounding whitespace.
pub fn normalize_cell(value: &str) -> String {
    value.trim().to_string()
}

/// Resolve the projected columns to `(name, source index)` pairs.
///
/// The primary key always comes first. Requested columns must exist;
/// optional columns are kept only when the header has them.
pub(crate) fn resolve_projection(
    headers: &CsvHeaders,
    primary_key: &str,
    columns: Option<&[String]>,
    optional_columns: &[String],
    path: &Path,
) -> Result<Vec<(String, usize)>> {
    let require = |name: &str| {
        headers.position(name).ok_or_else(|| IngestError::Schema {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
    };

    let mut projection = vec![(primary_key.to_string(), require(primary_key)?)];
    match columns {
        Some(requested) => {
            for name in requested {
                if projection.iter().any(|(existing, _)| existing == name) {
                    continue;
                }
                projection.push((name.clone(), require(name)?));
            }
        }
        None => {
            for (idx, name) in headers.columns.iter().enumerate() {
                if name.is_empty() || projection.iter().any(|(existing, _)| existing == name) {
                    continue;
                }
                projection.push((name.clone(), idx));
            }
        }
    }
    for name in optional_columns {
        if projection.iter().any(|(existing, _)| existing == name) {
            continue;
        }
        if let Some(idx) = headers.position(name) {
            projection.push((name.clone(), idx));
        }
    }
    Ok(projection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(columns: &[&str]) -> CsvHeaders {
        CsvHeaders::new(columns.iter().copied())
    }

    fn names(projection: &[(String, usize)]) -> Vec<&str> {
        projection.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  fdc_id  "), "fdc_id");
        assert_eq!(normalize_header("\u{feff}fdc_id"), "fdc_id");
    }

    #[test]
    fn test_projection_adds_primary_key_first() {
        let h = headers(&["description", "fdc_id", "data_type"]);
        let projection = resolve_projection(
            &h,
            "fdc_id",
            Some(&["data_type".to_string()]),
            &[],
            Path::new("food.csv"),
        )
        .unwrap();
        assert_eq!(projection, vec![("fdc_id".to_string(), 1), ("data_type".to_string(), 2)]);
    }

    #[test]
    fn test_projection_without_columns_keeps_header_order() {
        let h = headers(&["a", "id", "b"]);
        let projection = resolve_projection(&h, "id", None, &[], Path::new("x.csv")).unwrap();
        assert_eq!(names(&projection), vec!["id", "a", "b"]);
    }

    #[test]
    fn test_projection_missing_column_is_schema_error() {
        let h = headers(&["fdc_id", "description"]);
        let err = resolve_projection(
            &h,
            "fdc_id",
            Some(&["data_type".to_string()]),
            &[],
            Path::new("food.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::Schema { ref column, .. } if column == "data_type"));
    }

    #[test]
    fn test_projection_skips_absent_optional_columns() {
        let h = headers(&["fdc_id", "description"]);
        let projection = resolve_projection(
            &h,
            "fdc_id",
            Some(&["description".to_string()]),
            &["publication_date".to_string()],
            Path::new("food.csv"),
        )
        .unwrap();
        assert_eq!(names(&projection), vec!["fdc_id", "description"]);
    }
}
