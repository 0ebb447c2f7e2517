//! Load-time repair of persisted documents.
//!
//! Documents written by older builds may lack `columns`, `rows` or `cells` arrays, or
//! have rows without a cell for every column. Repair is a pure function over the raw
//! JSON value so it can be tested without any storage.

use serde_json::{Map, Value};

use crate::model::Document;

/// A repaired document and what the repair changed
#[derive(Debug, Clone, PartialEq)]
pub struct Repaired {
    pub document: Document,
    /// Empty cells appended by normalization
    pub cells_added: usize,
    /// Entries dropped because they could not be read
    pub entries_dropped: usize,
}

impl Repaired {
    /// Whether the repaired document differs from what was stored
    pub fn is_changed(&self) -> bool {
        self.cells_added > 0 || self.entries_dropped > 0
    }
}

/// Parse a persisted document and repair it
pub fn parse(text: &str) -> Result<Repaired, serde_json::Error> {
    let raw: Value = serde_json::from_str(text)?;
    repair(raw)
}

/// Turn a raw JSON value into a normalized [`Document`].
///
/// Inside each manufacturer, `columns`, `rows` and `cells` that are missing or not
/// arrays become empty, and entries without the expected string fields are dropped.
/// Manufacturers without a string `id` and `name` are dropped as well. Every
/// manufacturer is then normalized so each row holds one cell per column.
///
/// Only a value that is not a document at all (not an object, or `manufacturers`
/// neither an array nor `null`) is an error.
pub fn repair(mut raw: Value) -> Result<Repaired, serde_json::Error> {
    let mut entries_dropped = 0;
    if let Some(manufacturers) = raw
        .get_mut("manufacturers")
        .and_then(Value::as_array_mut)
    {
        let before = manufacturers.len();
        manufacturers.retain(|m| has_strings(m, &["id", "name"]));
        entries_dropped += before - manufacturers.len();

        for manufacturer in manufacturers.iter_mut().filter_map(Value::as_object_mut) {
            entries_dropped += sanitize_manufacturer(manufacturer);
        }
    }

    let mut document: Document = serde_json::from_value(raw)?;
    let cells_added = document
        .manufacturers
        .iter_mut()
        .map(|m| m.normalize_rows())
        .sum();

    Ok(Repaired {
        document,
        cells_added,
        entries_dropped,
    })
}

fn sanitize_manufacturer(manufacturer: &mut Map<String, Value>) -> usize {
    let mut dropped = 0;

    let mut columns = take_array(manufacturer, "columns");
    dropped += retain_counting(&mut columns, |c| has_strings(c, &["id", "name"]));
    manufacturer.insert("columns".to_string(), Value::Array(columns));

    let mut rows = take_array(manufacturer, "rows");
    dropped += retain_counting(&mut rows, |r| has_strings(r, &["id"]));
    for row in rows.iter_mut().filter_map(Value::as_object_mut) {
        let mut cells = take_array(row, "cells");
        dropped += retain_counting(&mut cells, |c| has_strings(c, &["columnId", "value"]));
        row.insert("cells".to_string(), Value::Array(cells));
    }
    manufacturer.insert("rows".to_string(), Value::Array(rows));

    dropped
}

/// Remove `key` and return its items; anything but an array yields no items
fn take_array(object: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match object.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn retain_counting(items: &mut Vec<Value>, keep: impl Fn(&Value) -> bool) -> usize {
    let before = items.len();
    items.retain(|item| keep(item));
    before - items.len()
}

fn has_strings(value: &Value, keys: &[&str]) -> bool {
    keys.iter()
        .all(|key| value.get(*key).is_some_and(Value::is_string))
}
