use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fdc_model::ConsolidationWarning;

use crate::types::ExportSummary;

pub fn print_summary(summary: &ExportSummary) {
    println!("{}", summary_table(summary));

    if !summary.files.is_empty() {
        println!();
        println!("Exports:");
        println!("{}", files_table(summary));
    }

    if let Some(table) = warnings_table(&summary.warnings) {
        println!();
        println!("Warnings:");
        println!("{table}");
    }

    println!("Finished in {:.2}s", summary.elapsed.as_secs_f64());
}

pub fn summary_table(summary: &ExportSummary) -> Table {
    let stats = &summary.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let rows: [(&str, usize); 7] = [
        ("Foods loaded", stats.foods_loaded),
        ("Foods after filter", stats.foods_after_filter),
        ("Measurements", stats.measurements),
        ("Rows", summary.rows),
        ("Columns", summary.columns),
        ("Nutrient columns", summary.nutrient_columns),
        ("Brand-only rows", stats.brand_only_rows),
    ];
    for (label, value) in rows {
        let value_cell = if label == "Brand-only rows" && value > 0 {
            Cell::new(value).fg(Color::Yellow).add_attribute(Attribute::Bold)
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(label), value_cell]);
    }
    table.add_row(vec![
        Cell::new("Consolidation time"),
        dim_cell(format!("{} ms", stats.elapsed.as_millis())),
    ]);
    table
}

fn files_table(summary: &ExportSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Format"), header_cell("Path")]);
    apply_table_style(&mut table);
    for file in &summary.files {
        table.add_row(vec![
            Cell::new(file.format.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(file.path.display()),
        ]);
    }
    table
}

pub fn warnings_table(warnings: &[ConsolidationWarning]) -> Option<Table> {
    if warnings.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Message")]);
    apply_table_style(&mut table);
    for warning in warnings {
        table.add_row(vec![
            Cell::new(warning.code()).fg(Color::Yellow),
            Cell::new(warning.to_string()),
        ]);
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
