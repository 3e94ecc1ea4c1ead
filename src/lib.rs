//! # Spreadsheet Table Store
//!
//! A library for treating a remote spreadsheet as a lightweight
//! row-oriented table store. The header row of each sheet names its
//! columns; rows are appended as name-keyed value maps and every
//! operation is translated into A1-notation ranges against a pluggable
//! remote value store.
//!
//! ## Features
//!
//! - **Schema reflection**: column names are discovered from row 1 and
//!   mapped bidirectionally to column letters (`A`, `B`, ..., `Z`, `AA`, ...)
//! - **Address translation**: bijective base-26 column-letter arithmetic
//!   and byte-exact A1 range rendering (`Orders!B3:B3`, `Orders!A:A`)
//! - **Row append**: one atomic batched write of single-cell ranges per
//!   inserted row, with raw or UI-parsed value interpretation
//! - **Header-preserving clear**: wipes all data rows, never row 1
//! - **Sheet creation**: adds a sheet remotely and persists its column
//!   names as the header row
//! - **Pluggable transport**: the [`ValueStore`] trait isolates the remote
//!   service; an in-memory implementation ships for hermetic use
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use sheetdb::{MemoryStore, Row, SpreadsheetDb};
//!
//! # fn main() -> Result<(), sheetdb::SheetDbError> {
//! let mut db = SpreadsheetDb::open(MemoryStore::new(), "inventory")?;
//! let parts = db.create_sheet("Parts", &["sku", "name"])?;
//!
//! let mut row = Row::new();
//! row.insert("sku".to_owned(), json!("C-137"));
//! row.insert("name".to_owned(), json!("flux capacitor"));
//! parts.insert(&row)?;
//!
//! assert_eq!(parts.next_empty_row_id()?, 3);
//! # Ok(())
//! # }
//! ```
pub mod database;
pub mod error;
pub mod reference;
pub mod store;

pub use crate::database::column::{ColumnError, ColumnMapping};
pub use crate::database::table::{Row, SheetTable, TableError};
pub use crate::database::{DatabaseError, SpreadsheetDb};
pub use crate::error::SheetDbError;
pub use crate::reference::{next_column, Range, ReferenceError};
pub use crate::store::memory::MemoryStore;
pub use crate::store::{
    BatchWrite, SheetProperties, StoreError, ValueInputOption, ValueRange, ValueStore,
};
