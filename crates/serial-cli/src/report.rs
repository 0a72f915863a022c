//! Terminal tables for a finished comparison.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serial_core::Comparison;
use serial_model::{MatchDetail, MatchStatus, RunStatus, Side};

/// Default number of detail rows shown per side.
pub const DEFAULT_DETAIL_LIMIT: usize = 20;

/// What an operator should do about one unmatched serial.
pub fn recommended_action(detail: &MatchDetail) -> &'static str {
    match (detail.side, detail.status) {
        (Side::Reference, MatchStatus::PotentialMatch) => "URGENT: Verify - likely a typo",
        (Side::Measured, MatchStatus::PotentialMatch) => "URGENT: Verify - might be misplaced",
        (_, MatchStatus::Similar) => "CHECK: Similar serial exists",
        (Side::Reference, _) => "NOT FOUND in measured list",
        (Side::Measured, _) => "NEW: Not in reference list",
    }
}

/// One-line verdict, e.g. `ALERT - potential typos detected`.
pub fn status_line(status: RunStatus) -> String {
    let label = match status {
        RunStatus::Ok => "OK",
        RunStatus::Warning => "WARNING",
        RunStatus::Alert => "ALERT",
    };
    format!("{label} - {}", status.description())
}

/// Per-side totals and typo breakdown.
pub fn summary_table(comparison: &Comparison) -> Table {
    let result = &comparison.result;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Side"),
        header_cell("Column"),
        header_cell("Serials"),
        header_cell("Matched"),
        header_cell("Unmatched"),
        header_cell("Potential typos"),
        header_cell("Needs review"),
        header_cell("Not found"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for side in [Side::Reference, Side::Measured] {
        let (total, unmatched) = match side {
            Side::Reference => (result.reference_total, result.missing_count),
            Side::Measured => (result.measured_total, result.extra_count),
        };
        let column = comparison
            .column(side)
            .map(|column| format!("{} ({})", column.name, column.method))
            .unwrap_or_else(|| "-".to_string());
        let breakdown = result.breakdown(side);
        table.add_row(vec![
            Cell::new(side).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(column),
            Cell::new(total),
            Cell::new(result.matched_count),
            count_cell(unmatched, Color::Yellow),
            count_cell(breakdown.potential_typos, Color::Red),
            count_cell(breakdown.needs_review, Color::Yellow),
            count_cell(breakdown.not_found, Color::Yellow),
        ]);
    }
    table
}

/// The first `limit` unmatched serials of one side.
pub fn details_table(details: &[MatchDetail], limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Serial"),
        header_cell("Closest"),
        header_cell("Similarity"),
        header_cell("Pattern"),
        header_cell("Differences"),
        header_cell("Action"),
    ]);
    apply_details_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for detail in details.iter().take(limit) {
        table.add_row(vec![
            Cell::new(&detail.serial),
            Cell::new(detail.closest_label()),
            Cell::new(format!("{:.1}%", detail.similarity)),
            Cell::new(detail.diff_pattern()),
            Cell::new(detail.char_differences()),
            action_cell(detail),
        ]);
    }
    table
}

fn action_cell(detail: &MatchDetail) -> Cell {
    let cell = Cell::new(recommended_action(detail));
    match detail.status {
        MatchStatus::PotentialMatch => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        MatchStatus::Similar => cell.fg(Color::Yellow),
        MatchStatus::Missing | MatchStatus::Extra => cell.fg(Color::DarkGrey),
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_details_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
