//! # Spreadsheet Database Module
//!
//! Treats one remote spreadsheet as a database of row-oriented tables:
//! each sheet becomes a [`SheetTable`] whose columns are named by the
//! sheet's header row. Tables are discovered once when the database is
//! opened and can be added with [`SpreadsheetDb::create_sheet`]; there is
//! no sheet deletion.
use crate::database::column::ColumnMapping;
use crate::database::table::{Row, SheetTable};
use crate::error::{ResultMessage, SheetDbError};
use crate::store::{ValueInputOption, ValueStore};
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub mod column;
pub mod table;

/// Errors related to sheet lookup and creation.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("Sheet '{0}' already exists")]
    DuplicateSheet(String),
}

/// A whole spreadsheet, exposed as a set of named tables.
pub struct SpreadsheetDb<S> {
    store: Arc<S>,
    spreadsheet_id: String,
    sheets: HashMap<String, SheetTable<S>>,
}

impl<S: ValueStore> SpreadsheetDb<S> {
    /// Opens a spreadsheet: enumerates its sheets from the remote service
    /// and reflects each sheet's header row into a table.
    pub fn open(store: impl Into<Arc<S>>, spreadsheet_id: &str) -> Result<Self, SheetDbError> {
        let store = store.into();
        let mut sheets = HashMap::new();
        let properties = store
            .list_sheets(spreadsheet_id)
            .with_prefix("Reflect spreadsheet metadata failed")?;
        for sheet in properties {
            let table = SheetTable::open(Arc::clone(&store), spreadsheet_id, &sheet.title)?;
            sheets.insert(sheet.title, table);
        }
        info!(
            spreadsheet = spreadsheet_id,
            sheets = sheets.len(),
            "opened spreadsheet"
        );
        Ok(Self {
            store,
            spreadsheet_id: spreadsheet_id.to_owned(),
            sheets,
        })
    }

    /// Id of the underlying spreadsheet.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Titles of the known sheets, in no particular order.
    pub fn sheet_titles(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Looks up a table by sheet title.
    pub fn sheet(&self, title: &str) -> Result<&SheetTable<S>, SheetDbError> {
        self.sheets
            .get(title)
            .ok_or_else(|| DatabaseError::SheetNotFound(title.to_owned()).into())
    }

    /// Creates a new sheet with the given column names and writes them as
    /// its header row, stored unparsed so the header text stays exactly as
    /// given. Returns the new table.
    ///
    /// A duplicate title or a repeated column name fails before any remote
    /// call. The remote sheet creation and the header write are two steps
    /// with no rollback: if the header write fails, the remote sheet
    /// exists without a header row and no table is registered here.
    pub fn create_sheet(
        &mut self,
        title: &str,
        column_names: &[&str],
    ) -> Result<&SheetTable<S>, SheetDbError> {
        let entry = match self.sheets.entry(title.to_owned()) {
            Entry::Occupied(_) => {
                return Err(DatabaseError::DuplicateSheet(title.to_owned()).into());
            }
            Entry::Vacant(entry) => entry,
        };
        let columns = ColumnMapping::from_names(column_names.iter().copied())?;
        self.store
            .add_sheet(&self.spreadsheet_id, title)
            .with_prefix("Create sheet failed")?;
        let table = SheetTable::with_columns(
            Arc::clone(&self.store),
            &self.spreadsheet_id,
            title,
            columns,
        );
        let header: Row = column_names
            .iter()
            .map(|name| (name.to_string(), Value::String(name.to_string())))
            .collect();
        table.insert_row(&header, ValueInputOption::Raw)?;
        info!(
            spreadsheet = %self.spreadsheet_id,
            sheet = title,
            columns = column_names.len(),
            "created sheet"
        );
        Ok(entry.insert(table))
    }
}
