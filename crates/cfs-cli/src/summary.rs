use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cfs_core::{ClassificationStats, label_for};
use cfs_model::CfsScore;
use cfs_validate::ValidationSummary;

/// Print the score distribution and rule hits of one classification run.
///
/// Goes to stderr so a CSV written to stdout stays clean.
pub fn print_classification(stats: &ClassificationStats) {
    eprintln!("Decision table: {}", stats.table);
    eprintln!(
        "Rows: {}  scored: {}  missing: {}  cells cleaned: {}",
        stats.rows, stats.scored, stats.missing, stats.cells_cleaned
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Score"),
        header_cell("Label"),
        header_cell("Rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for score in listed_scores(stats) {
        let count = stats.score_counts.get(&score.value()).copied();
        table.add_row(vec![
            Cell::new(score.value()).add_attribute(Attribute::Bold),
            Cell::new(label_for(score)),
            count_cell(count, Color::Green),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        dim_cell("missing"),
        count_cell(Some(stats.missing), Color::Yellow),
    ]);
    eprintln!("{table}");

    if !stats.rule_hits.is_empty() {
        let mut hits = Table::new();
        hits.set_header(vec![header_cell("Rule"), header_cell("Rows")]);
        apply_table_style(&mut hits);
        align_column(&mut hits, 0, CellAlignment::Center);
        align_column(&mut hits, 1, CellAlignment::Right);
        for (rule, count) in &stats.rule_hits {
            hits.add_row(vec![Cell::new(rule), count_cell(Some(*count), Color::Cyan)]);
        }
        if stats.gated > 0 {
            hits.add_row(vec![
                dim_cell("gated"),
                count_cell(Some(stats.gated), Color::Yellow),
            ]);
        }
        eprintln!("{hits}");
    }
}

/// Scores the run's scale can assign.
fn listed_scores(stats: &ClassificationStats) -> Vec<CfsScore> {
    let max = stats.scale.max_score();
    CfsScore::all().filter(|score| score.value() <= max).collect()
}

/// Print the pass/fail/missing counts of a validation run.
pub fn print_validation(summary: &ValidationSummary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Passed"),
        header_cell("Failed"),
        header_cell("Missing"),
        header_cell("Total"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        count_cell(Some(summary.passed), Color::Green),
        count_cell(Some(summary.failed), Color::Red),
        count_cell(Some(summary.missing), Color::Yellow),
        Cell::new(summary.total()),
    ]);
    eprintln!("{table}");
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(100);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
