//! Rendering of result tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table as TextTable};
use qaaws_model::Table;

/// Render records as a text table, one column per field of the first
/// record. Nulls are shown empty.
#[must_use]
pub fn render_table(table: &Table) -> TextTable {
    let columns = table.columns();
    let mut text = TextTable::new();
    apply_table_style(&mut text);
    text.set_header(columns.clone());
    for record in table.raw_table() {
        let row: Vec<&str> = columns
            .iter()
            .map(|column| record.get(column).flatten().unwrap_or(""))
            .collect();
        text.add_row(row);
    }
    text
}

pub fn apply_table_style(table: &mut TextTable) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}
