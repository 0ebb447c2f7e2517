//! Document model
//!
//! Manufacturers own their columns and rows; a row ties values to columns through
//! [`Cell::column_id`]. The serialized form of these types is the persisted format.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::store::IdGenerator;

/// Top-level persisted entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub manufacturers: Vec<Manufacturer>,
}

/// A manufacturer and its user-defined license table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub columns: Vec<Column>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rows: Vec<Row>,
}

/// Named field definition within a manufacturer's table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
}

/// One record within a manufacturer's table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cells: Vec<Cell>,
}

/// One field value of a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(rename = "columnId")]
    pub column_id: String,
    pub value: String,
}

/// Result of a mutation addressed by id.
///
/// Stale references are tolerated: the store reports `NotFound` and leaves the
/// document untouched instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NotFound,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }

    /// Turn `NotFound` into an error for callers that want strict behaviour
    pub fn ok_or(self, err: StoreError) -> Result<()> {
        match self {
            Outcome::Applied => Ok(()),
            Outcome::NotFound => Err(err),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Cell {
    pub fn empty(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            value: String::new(),
        }
    }
}

impl Row {
    pub fn cell(&self, column_id: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.column_id == column_id)
    }

    /// Value shown for a column; missing cells read as empty
    pub fn value(&self, column_id: &str) -> &str {
        self.cell(column_id).map(|c| c.value.as_str()).unwrap_or("")
    }
}

impl Document {
    pub fn find_manufacturer(&self, id: &str) -> Option<&Manufacturer> {
        self.manufacturers.iter().find(|m| m.id == id)
    }

    pub fn find_manufacturer_mut(&mut self, id: &str) -> Option<&mut Manufacturer> {
        self.manufacturers.iter_mut().find(|m| m.id == id)
    }

    /// Case-insensitive name lookup, used to reject duplicate manufacturers
    pub fn find_manufacturer_by_name(&self, name: &str) -> Option<&Manufacturer> {
        let needle = name.to_lowercase();
        self.manufacturers
            .iter()
            .find(|m| m.name.to_lowercase() == needle)
    }
}

impl Manufacturer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Append a column and extend every existing row with an empty cell for it
    pub fn add_column(&mut self, ids: &dyn IdGenerator, name: impl Into<String>) -> &Column {
        let column = Column {
            id: ids.generate(),
            name: name.into(),
        };
        for row in &mut self.rows {
            row.cells.push(Cell::empty(column.id.clone()));
        }
        self.columns.push(column);
        &self.columns[self.columns.len() - 1]
    }

    /// Drop a column together with every cell that references it
    pub fn remove_column(&mut self, column_id: &str) -> Outcome {
        let before = self.columns.len();
        self.columns.retain(|c| c.id != column_id);
        if self.columns.len() == before {
            return Outcome::NotFound;
        }
        for row in &mut self.rows {
            row.cells.retain(|cell| cell.column_id != column_id);
        }
        Outcome::Applied
    }

    /// Append a row with one empty cell per column, in column order
    pub fn add_row(&mut self, ids: &dyn IdGenerator) -> &Row {
        let row = Row {
            id: ids.generate(),
            cells: self.columns.iter().map(|c| Cell::empty(c.id.clone())).collect(),
        };
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    pub fn remove_row(&mut self, row_id: &str) -> Outcome {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != row_id);
        if self.rows.len() == before {
            Outcome::NotFound
        } else {
            Outcome::Applied
        }
    }

    /// Overwrite a cell value.
    ///
    /// An unknown row drops the edit. A row lacking a cell for `column_id` gets one
    /// appended, which heals edits made against a stale rendering.
    pub fn set_cell_value(
        &mut self,
        row_id: &str,
        column_id: &str,
        value: impl Into<String>,
    ) -> Outcome {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == row_id) else {
            return Outcome::NotFound;
        };
        let value = value.into();
        match row.cells.iter_mut().find(|c| c.column_id == column_id) {
            Some(cell) => cell.value = value,
            None => row.cells.push(Cell {
                column_id: column_id.to_string(),
                value,
            }),
        }
        Outcome::Applied
    }

    /// Give every row one cell per current column.
    ///
    /// Missing cells are appended empty; existing values are kept. Cells that refer to
    /// columns no longer defined are left in place. Returns the number of cells added,
    /// so a second call always returns 0.
    pub fn normalize_rows(&mut self) -> usize {
        let mut added = 0;
        for row in &mut self.rows {
            for column in &self.columns {
                if !row.cells.iter().any(|c| c.column_id == column.id) {
                    row.cells.push(Cell::empty(column.id.clone()));
                    added += 1;
                }
            }
        }
        added
    }
}
