//! Row operations on one sheet.
use crate::database::column::ColumnMapping;
use crate::error::SheetDbError;
use crate::reference::{Range, FIRST_COLUMN};
use crate::store::{BatchWrite, ValueInputOption, ValueRange, ValueStore};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// A row to append, keyed by column name.
pub type Row = HashMap<String, Value>;

/// Errors related to row operations.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column '{name}' not found in sheet '{sheet}'")]
    UnknownColumn { sheet: String, name: String },
}

/// One sheet of a spreadsheet, treated as a row-oriented table.
///
/// Row 1 holds the column names; the mapping from names to column letters
/// is fixed at construction. All operations are translated into A1 ranges
/// against the remote store.
pub struct SheetTable<S> {
    store: Arc<S>,
    spreadsheet_id: String,
    title: String,
    columns: ColumnMapping,
}

impl<S: ValueStore> SheetTable<S> {
    /// Opens an existing sheet, deriving its column mapping from the
    /// header row.
    pub(crate) fn open(
        store: Arc<S>,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<Self, SheetDbError> {
        let mut table = Self::with_columns(store, spreadsheet_id, title, ColumnMapping::default());
        table.columns = table.reflect_columns()?;
        Ok(table)
    }

    /// Binds a sheet to an already-known column mapping, skipping the
    /// remote reflect step. Used right after sheet creation, when the
    /// header row is about to be written from the same mapping.
    pub(crate) fn with_columns(
        store: Arc<S>,
        spreadsheet_id: &str,
        title: &str,
        columns: ColumnMapping,
    ) -> Self {
        Self {
            store,
            spreadsheet_id: spreadsheet_id.to_owned(),
            title: title.to_owned(),
            columns,
        }
    }

    /// Sheet title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Id of the spreadsheet this sheet belongs to.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// The column mapping this table was constructed with.
    pub fn columns(&self) -> &ColumnMapping {
        &self.columns
    }

    /// Reads the header row and returns the mapping it describes: each
    /// cell value becomes a column name, assigned letters from `A` left to
    /// right. An absent header row yields an empty mapping.
    ///
    /// Pure read; the table's own mapping is not replaced.
    pub fn reflect_columns(&self) -> Result<ColumnMapping, SheetDbError> {
        let range = Range::header_row(&self.title).to_string();
        let rows = self.store.read_range(&self.spreadsheet_id, &range)?;
        let header = rows.into_iter().next().unwrap_or_default();
        ColumnMapping::from_header_row(&header)
    }

    /// 1-based id of the first row with no value in column `A`, computed
    /// as the number of occupied column-`A` rows plus one. Column `A` is
    /// assumed to have no gaps; this is not verified.
    pub fn next_empty_row_id(&self) -> Result<usize, SheetDbError> {
        let range = Range::full_column(&self.title, FIRST_COLUMN).to_string();
        let rows = self.store.read_range(&self.spreadsheet_id, &range)?;
        Ok(rows.len() + 1)
    }

    /// Appends `row` at the next empty row with values parsed as if typed
    /// into the UI.
    pub fn insert(&self, row: &Row) -> Result<(), SheetDbError> {
        self.insert_row(row, ValueInputOption::UserEntered)
    }

    /// Appends `row` at the next empty row, writing one single-cell range
    /// per value in one atomic batch.
    ///
    /// Every key of `row` must exist in the column mapping; an unknown
    /// column fails before any remote call is made. The target row id is
    /// recomputed on every call and the id read and the write are separate
    /// round-trips, so concurrent writers to the same sheet can pick the
    /// same row and overwrite each other.
    pub fn insert_row(&self, row: &Row, option: ValueInputOption) -> Result<(), SheetDbError> {
        for name in row.keys() {
            if self.columns.letter(name).is_none() {
                return Err(TableError::UnknownColumn {
                    sheet: self.title.clone(),
                    name: name.clone(),
                }
                .into());
            }
        }
        let row_id = self.next_empty_row_id()?;
        let mut data = Vec::with_capacity(row.len());
        for (name, letter) in self.columns.iter() {
            if let Some(value) = row.get(name) {
                data.push(ValueRange {
                    range: Range::cell(&self.title, letter, row_id).to_string(),
                    values: vec![vec![value.clone()]],
                });
            }
        }
        debug!(
            sheet = %self.title,
            row_id,
            cells = data.len(),
            option = option.as_str(),
            "appending row"
        );
        let batch = BatchWrite {
            value_input_option: option,
            data,
        };
        self.store.batch_write(&self.spreadsheet_id, &batch)?;
        Ok(())
    }

    /// Clears every data row, leaving the header row untouched: the
    /// rectangle from `A2` to the rightmost mapped column at the last
    /// occupied row. Calling it on a table with no data rows is a no-op.
    pub fn clear_all_data(&self) -> Result<(), SheetDbError> {
        let bottom = self.next_empty_row_id()? - 1;
        if bottom < 2 {
            debug!(sheet = %self.title, "no data rows to clear");
            return Ok(());
        }
        let rightmost = self.columns.last_letter().unwrap_or(FIRST_COLUMN);
        let range = Range::rect(&self.title, FIRST_COLUMN, 2, rightmost, bottom).to_string();
        debug!(sheet = %self.title, range = %range, "clearing data rows");
        self.store.clear_range(&self.spreadsheet_id, &range)?;
        Ok(())
    }
}
