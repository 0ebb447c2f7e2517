//! Input checks applied by the UI layer before calling the store.

use crate::error::{Result, StoreError};
use crate::model::Document;

/// Trim a manufacturer name and reject empty or case-insensitively duplicate names
pub fn manufacturer_name(document: &Document, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidArgument(
            "manufacturer name must not be empty".to_string(),
        ));
    }
    if let Some(existing) = document.find_manufacturer_by_name(name) {
        return Err(StoreError::InvalidArgument(format!(
            "manufacturer '{}' already exists",
            existing.name
        )));
    }
    Ok(name.to_string())
}

/// Trim a column name and reject empty names
pub fn column_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidArgument(
            "column name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

pub fn cell_value(value: &str) -> String {
    value.trim().to_string()
}
