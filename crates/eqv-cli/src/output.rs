//! Table and JSON rendering of command results.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use eqv_analysis::map_parameter_slots;
use eqv_cli::pipeline::DatasetView;
use eqv_model::{DatasetInfo, ParameterSlot, SummaryView, UploadOutcome};
use eqv_store::Account;

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_account(account: &Account) {
    println!("User: {}", account.username);
    println!("Email: {}", account.email);
    if let Some(created_at) = account.created_at {
        println!("Registered: {}", created_at.format("%Y-%m-%d %H:%M"));
    }
}

pub fn print_upload(outcome: &UploadOutcome) {
    println!("{}", outcome.message);
    println!(
        "Dataset #{}: {} ({} records)",
        outcome.dataset.id, outcome.dataset.name, outcome.dataset.total_count
    );
    let summary = &outcome.column_summary;
    println!("Name column: {}", summary.name_column);
    println!(
        "Category column: {}",
        summary.category_column.as_deref().unwrap_or("-")
    );
    println!(
        "Numeric columns: {} of {}",
        summary.numeric_columns.len(),
        summary.total_columns
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Slot"),
        header_cell("Column"),
        header_cell("Average"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Std"),
    ]);
    apply_table_style(&mut table);
    for column in 2..6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for slot in ParameterSlot::ALL {
        let label = outcome.column_mapping.label(slot);
        let mut row = vec![Cell::new(slot.placeholder()), Cell::new(label)];
        match (outcome.averages.get(label), outcome.ranges.get(label)) {
            (Some(average), Some(range)) => row.extend([
                number_cell(*average),
                number_cell(range.min),
                number_cell(range.max),
                number_cell(range.std),
            ]),
            _ => row.extend((0..4).map(|_| dim_cell("-"))),
        }
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_datasets(datasets: &[DatasetInfo]) {
    if datasets.is_empty() {
        println!("No datasets yet. Upload one with `eqv upload <FILE>`.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Uploaded"),
        header_cell("Records"),
        header_cell("Avg 1"),
        header_cell("Avg 2"),
        header_cell("Avg 3"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for column in 3..7 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for dataset in datasets {
        let mut row = vec![
            Cell::new(dataset.id).add_attribute(Attribute::Bold),
            Cell::new(&dataset.name),
            Cell::new(dataset.uploaded_at.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(dataset.total_count),
        ];
        row.extend(dataset.averages.iter().map(|(_, v)| number_cell(*v)));
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_dataset(view: &DatasetView) {
    let info = &view.detail.info;
    println!("Dataset #{}: {}", info.id, info.name);
    println!("Uploaded: {}", info.uploaded_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("SHA-256: {}", info.source_hash);

    let mapping = map_parameter_slots(&view.detail.column_summary.numeric_columns);
    let mut table = Table::new();
    let mut header = vec![header_cell("Name"), header_cell("Type")];
    header.extend(ParameterSlot::ALL.map(|slot| header_cell(mapping.label(slot))));
    table.set_header(header);
    apply_table_style(&mut table);
    for column in 2..5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for record in &view.detail.records {
        let mut row = vec![Cell::new(&record.name), Cell::new(&record.category)];
        row.extend(record.values.iter().map(|(_, v)| number_cell(*v)));
        table.add_row(row);
    }
    println!("{table}");

    let mut categories = Table::new();
    categories.set_header(vec![header_cell("Category"), header_cell("Count")]);
    apply_table_style(&mut categories);
    align_column(&mut categories, 1, CellAlignment::Right);
    for (category, count) in &view.category_distribution {
        categories.add_row(vec![Cell::new(category), Cell::new(count)]);
    }
    println!("{categories}");
}

pub fn print_summary(summary: &SummaryView) {
    println!("Dataset #{}: {}", summary.id, summary.name);
    println!("Total equipment: {}", summary.total_count);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Parameter"),
        header_cell("Average"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Std"),
        header_cell("Variance"),
        header_cell("CV %"),
        header_cell("Q1"),
        header_cell("Median"),
        header_cell("Q3"),
    ]);
    apply_table_style(&mut table);
    for column in 1..10 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for slot in ParameterSlot::ALL {
        let range = &summary.ranges[slot];
        let mut row = vec![
            Cell::new(summary.column_mapping.label(slot)).add_attribute(Attribute::Bold),
            number_cell(summary.averages[slot]),
            number_cell(range.min),
            number_cell(range.max),
            number_cell(range.std),
            number_cell(range.variance),
            number_cell(range.cv),
        ];
        match &summary.quartiles[slot] {
            Some(q) => row.extend([number_cell(q.q1), number_cell(q.median), number_cell(q.q3)]),
            None => row.extend((0..3).map(|_| dim_cell("-"))),
        }
        table.add_row(row);
    }
    println!("{table}");

    let mut categories = Table::new();
    categories.set_header(vec![
        header_cell("Category"),
        header_cell("Count"),
        header_cell("Share"),
    ]);
    apply_table_style(&mut categories);
    align_column(&mut categories, 1, CellAlignment::Right);
    align_column(&mut categories, 2, CellAlignment::Right);
    for (category, count) in &summary.category_counts {
        let share = summary
            .category_percentages
            .get(category)
            .copied()
            .unwrap_or(0.0);
        categories.add_row(vec![
            Cell::new(category),
            Cell::new(count),
            Cell::new(format!("{share:.2}%")),
        ]);
    }
    println!("{categories}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn number_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}"))
}
