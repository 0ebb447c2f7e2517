//! Plain-text rendering of the document for the terminal.

use std::fmt::Write;

use crate::model::{Document, Manufacturer};

/// One entry per manufacturer with its column and row counts
pub fn manufacturer_list(document: &Document) -> String {
    if document.manufacturers.is_empty() {
        return "No manufacturers yet. Add one in admin mode.".to_string();
    }

    let mut out = String::new();
    for m in &document.manufacturers {
        let _ = writeln!(out, "{} [{}]", m.name, m.id);
        let _ = writeln!(
            out,
            "  {} columns · {} entries",
            m.columns.len(),
            m.rows.len()
        );
    }
    out
}

/// Render a manufacturer's table with row ids in the first column.
///
/// Cells are looked up by column, so stale cells are never shown and missing ones
/// render empty.
pub fn table(manufacturer: &Manufacturer, admin: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", manufacturer.name, manufacturer.id);
    let _ = writeln!(
        out,
        "Admin mode {}",
        if admin { "active" } else { "inactive" }
    );

    if !manufacturer.columns.is_empty() {
        let ids: Vec<String> = manufacturer
            .columns
            .iter()
            .map(|c| format!("{} [{}]", c.name, c.id))
            .collect();
        let _ = writeln!(out, "Columns: {}", ids.join(", "));
    }

    let mut grid: Vec<Vec<&str>> = Vec::with_capacity(manufacturer.rows.len() + 1);
    let mut header = vec!["Row"];
    header.extend(manufacturer.columns.iter().map(|c| c.name.as_str()));
    grid.push(header);
    for row in &manufacturer.rows {
        let mut line = vec![row.id.as_str()];
        line.extend(manufacturer.columns.iter().map(|c| row.value(&c.id)));
        grid.push(line);
    }

    let widths: Vec<usize> = (0..grid[0].len())
        .map(|i| grid.iter().map(|r| r[i].chars().count()).max().unwrap_or(0))
        .collect();

    for line in &grid {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(text, width)| format!("{:<width$}", text, width = *width))
            .collect();
        let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
    }

    if manufacturer.rows.is_empty() {
        let _ = writeln!(out, "No rows yet.");
    }
    out
}
