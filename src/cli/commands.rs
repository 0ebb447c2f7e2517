//! Subcommands and their execution against a [`DocumentStore`].
//!
//! Each mutation checks the session first, validates input, then runs a full
//! load-mutate-save cycle through the store.

use clap::Subcommand;
use log::debug;

use crate::cli::render;
use crate::error::{Result, StoreError};
use crate::model::Outcome;
use crate::session::Session;
use crate::store::{Backend, DocumentStore, IdGenerator};
use crate::validate;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List manufacturers
    List,
    /// Show a manufacturer's license table
    Show { manufacturer: String },
    /// Add a manufacturer (admin)
    AddManufacturer { name: String },
    /// Remove a manufacturer with all its columns and rows (admin)
    RemoveManufacturer { manufacturer: String },
    /// Add a column to a manufacturer's table (admin)
    AddColumn { manufacturer: String, name: String },
    /// Remove a column and its cells (admin)
    RemoveColumn { manufacturer: String, column: String },
    /// Add an empty row (admin)
    AddRow { manufacturer: String },
    /// Remove a row (admin)
    RemoveRow { manufacturer: String, row: String },
    /// Set the value of one cell (admin)
    SetCell {
        manufacturer: String,
        row: String,
        column: String,
        value: String,
    },
}

/// Run a command and return the text to print
pub fn execute<B: Backend, G: IdGenerator>(
    store: &DocumentStore<B, G>,
    session: &Session,
    command: Command,
) -> Result<String> {
    debug!("Executing {:?}", command);
    match command {
        Command::List => Ok(render::manufacturer_list(&store.load()?)),

        Command::Show { manufacturer } => {
            let document = store.load()?;
            let m = document
                .find_manufacturer(&manufacturer)
                .ok_or(StoreError::ManufacturerNotFound(manufacturer))?;
            Ok(render::table(m, session.is_admin()))
        }

        Command::AddManufacturer { name } => {
            session.require_admin("add manufacturers")?;
            let mut document = store.load()?;
            let name = validate::manufacturer_name(&document, &name)?;
            let m = store.add_manufacturer(&mut document, &name)?;
            Ok(format!("Manufacturer \"{}\" added [{}].", m.name, m.id))
        }

        Command::RemoveManufacturer { manufacturer } => {
            session.require_admin("delete manufacturers")?;
            let mut document = store.load()?;
            let name = document
                .find_manufacturer(&manufacturer)
                .map(|m| m.name.clone())
                .unwrap_or_default();
            store
                .remove_manufacturer(&mut document, &manufacturer)?
                .ok_or(StoreError::ManufacturerNotFound(manufacturer))?;
            Ok(format!("Manufacturer \"{}\" deleted.", name))
        }

        Command::AddColumn { manufacturer, name } => {
            session.require_admin("add columns")?;
            let name = validate::column_name(&name)?;
            let column_id = store
                .modify_manufacturer(&manufacturer, |m, ids| {
                    m.add_column(ids, name.as_str()).id.clone()
                })?
                .ok_or(StoreError::ManufacturerNotFound(manufacturer))?;
            Ok(format!("Column \"{}\" added [{}].", name, column_id))
        }

        Command::RemoveColumn {
            manufacturer,
            column,
        } => {
            session.require_admin("delete columns")?;
            let (name, outcome) = store
                .modify_manufacturer(&manufacturer, |m, _| {
                    let name = m.column(&column).map(|c| c.name.clone());
                    (name, m.remove_column(&column))
                })?
                .ok_or(StoreError::ManufacturerNotFound(manufacturer))?;
            Ok(match name {
                Some(name) if outcome.is_applied() => format!("Column \"{}\" deleted.", name),
                _ => format!("No column [{}], nothing deleted.", column),
            })
        }

        Command::AddRow { manufacturer } => {
            session.require_admin("add rows")?;
            let row_id = store
                .modify_manufacturer(&manufacturer, |m, ids| m.add_row(ids).id.clone())?
                .ok_or(StoreError::ManufacturerNotFound(manufacturer))?;
            Ok(format!("New row created [{}].", row_id))
        }

        Command::RemoveRow { manufacturer, row } => {
            session.require_admin("delete rows")?;
            let outcome = store
                .modify_manufacturer(&manufacturer, |m, _| m.remove_row(&row))?
                .ok_or(StoreError::ManufacturerNotFound(manufacturer))?;
            Ok(match outcome {
                Outcome::Applied => "Row deleted.".to_string(),
                Outcome::NotFound => format!("No row [{}], nothing deleted.", row),
            })
        }

        Command::SetCell {
            manufacturer,
            row,
            column,
            value,
        } => {
            session.require_admin("edit cells")?;
            let value = validate::cell_value(&value);
            let outcome = store
                .modify_manufacturer(&manufacturer, |m, _| {
                    m.set_cell_value(&row, &column, value.as_str())
                })?
                .ok_or(StoreError::ManufacturerNotFound(manufacturer))?;
            Ok(match outcome {
                Outcome::Applied => "Cell updated.".to_string(),
                Outcome::NotFound => format!("No row [{}], edit dropped.", row),
            })
        }
    }
}
