use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cardio_model::{FIELDS, FieldKind, FieldSpec, RiskClass};
use cardio_report::ResultView;

use crate::config::AppConfig;

/// The result block: risk class, message and probability.
pub fn result_table(view: &ResultView) -> Table {
    let color = risk_color(view.risk_class);
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![
        label_cell("Risk"),
        Cell::new(view.risk_class.label())
            .fg(color)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![label_cell("Result"), Cell::new(&view.message).fg(color)]);
    table.add_row(vec![
        label_cell("Probability"),
        Cell::new(&view.probability_text),
    ]);
    table
}

/// The form field catalog.
pub fn fields_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Allowed"),
        header_cell("Importance"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for spec in &FIELDS {
        table.add_row(vec![
            Cell::new(spec.key).add_attribute(Attribute::Bold),
            Cell::new(spec.label),
            Cell::new(spec.domain_text()),
            Cell::new(format!("{:.2}%", spec.importance * 100.0)),
            Cell::new(field_details(spec)),
        ]);
    }
    table
}

/// Resolved configuration values.
pub fn config_table(config: &AppConfig, path: Option<&Path>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    let path_cell = match path {
        Some(path) if path.exists() => Cell::new(path.display()),
        Some(path) => dim_cell(format!("{} (not found, defaults)", path.display())),
        None => dim_cell("-"),
    };
    table.add_row(vec![label_cell("config file"), path_cell]);
    table.add_row(vec![
        label_cell("api.environment"),
        Cell::new(config.api.environment),
    ]);
    table.add_row(vec![
        label_cell("api.base_url"),
        Cell::new(config.api.resolved_base_url()),
    ]);
    table.add_row(vec![
        label_cell("report.output_dir"),
        Cell::new(config.report.output_dir.display()),
    ]);
    table.add_row(vec![
        label_cell("report.open"),
        Cell::new(config.report.open),
    ]);
    table
}

fn field_details(spec: &FieldSpec) -> String {
    match spec.kind {
        FieldKind::Numeric { typical, unit, .. } => {
            let unit = unit.map(|u| format!(" {u}")).unwrap_or_default();
            format!(
                "{} (typical {}-{}{unit})",
                spec.description, typical.0, typical.1
            )
        }
        FieldKind::Categorical { codes } => {
            let codes = codes
                .iter()
                .map(|c| format!("{} = {}", c.code, c.label))
                .collect::<Vec<_>>()
                .join("; ");
            format!("{}: {codes}", spec.description)
        }
    }
}

fn risk_color(risk: RiskClass) -> Color {
    if risk.is_high() {
        Color::Red
    } else {
        Color::Green
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
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

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
