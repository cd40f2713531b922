use std::time::Duration;

use fdc_core::ConsolidationStats;
use fdc_model::ConsolidationWarning;
use fdc_output::ExportedFile;

/// Outcome of an `export` run, as shown in the summary.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub rows: usize,
    pub columns: usize,
    pub nutrient_columns: usize,
    pub stats: ConsolidationStats,
    pub warnings: Vec<ConsolidationWarning>,
    pub files: Vec<ExportedFile>,
    /// Wall time including the exports.
    pub elapsed: Duration,
}
