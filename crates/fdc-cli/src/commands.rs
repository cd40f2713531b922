use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use fdc_core::{Consolidation, consolidate};
use fdc_model::{ExportFormat, FoodDataType};
use fdc_output::export_table;

use crate::cli::ExportArgs;
use crate::summary::apply_table_style;
use crate::types::ExportSummary;

/// Known data types with a short description.
pub fn data_types_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Data type", "Description"]);
    apply_table_style(&mut table);
    for data_type in FoodDataType::ALL {
        table.add_row(vec![data_type.as_str(), data_type.description()]);
    }
    table
}

pub fn run_data_types() -> Result<()> {
    println!("{}", data_types_table());
    Ok(())
}

/// Parses every requested format up front so nothing runs on a bad name.
pub fn parse_formats(names: &[String]) -> Result<Vec<ExportFormat>> {
    names
        .iter()
        .map(|name| {
            name.parse::<ExportFormat>()
                .with_context(|| format!("invalid --export-format {name}"))
        })
        .collect()
}

pub fn run_export(args: &ExportArgs) -> Result<ExportSummary> {
    let start = Instant::now();
    let formats = parse_formats(&args.export_formats)?;
    let sources = args.source_paths();
    let options = args.consolidation_options();

    let Consolidation {
        table,
        warnings,
        stats,
    } = consolidate(&sources, &options).context("consolidate food data")?;

    let files = info_span!("export", base = %args.export_file_name.display())
        .in_scope(|| export_table(&table, &args.export_file_name, &formats))
        .context("write exports")?;

    Ok(ExportSummary {
        rows: table.len(),
        columns: table.column_count(),
        nutrient_columns: table.nutrient_column_count(),
        stats,
        warnings,
        files,
        elapsed: start.elapsed(),
    })
}
