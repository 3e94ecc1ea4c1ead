//! # Remote Value-Store Contract
//!
//! The table layer never talks to a spreadsheet service directly; it goes
//! through the [`ValueStore`] trait, a blocking key-range API over A1-named
//! ranges. Credential acquisition and HTTP transport belong to whichever
//! implementation backs the trait; [`memory::MemoryStore`] is the bundled
//! in-process implementation.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod memory;

/// Errors raised at the store boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport or service failure, opaque to the caller and propagated
    /// unchanged. Never retried or translated here.
    #[error("Remote spreadsheet call failed: {0}")]
    Remote(#[from] anyhow::Error),

    /// Unrecognized value input option name
    #[error("Invalid value input option '{0}'")]
    InvalidValueInputOption(String),
}

/// How the remote service interprets written values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Values are not parsed and are stored as-is.
    Raw,
    /// Values are parsed as if the user typed them into the UI.
    UserEntered,
}

impl ValueInputOption {
    /// Returns the wire name of the option.
    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }

    /// Parses an option from its wire name. Accepts common alias spellings.
    pub fn parse(name: &str) -> Result<Self, StoreError> {
        match name.to_ascii_uppercase().as_str() {
            "RAW" => Ok(Self::Raw),
            "USER_ENTERED" | "USER-ENTERED" | "USERENTERED" => Ok(Self::UserEntered),
            _ => Err(StoreError::InvalidValueInputOption(name.to_owned())),
        }
    }
}

/// One range of values, addressed in A1 notation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// A1 range the values occupy, e.g. `Orders!B3:B3`
    pub range: String,
    /// Row-major values
    pub values: Vec<Vec<Value>>,
}

/// A batched write applied atomically by the remote service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchWrite {
    /// Interpretation mode for every value in the batch
    pub value_input_option: ValueInputOption,
    /// Ranges to write, applied in one remote call
    pub data: Vec<ValueRange>,
}

/// Schema-level properties of one sheet inside a spreadsheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetProperties {
    pub title: String,
}

/// Blocking key-range access to a remote spreadsheet service.
///
/// Every method is one request/response round-trip; there is no retry loop
/// and no timeout policy beyond what the underlying transport applies.
pub trait ValueStore {
    /// Reads the values of an A1 range as ordered rows of scalar cells.
    /// An absent range yields an empty result, not an error.
    fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<Value>>, StoreError>;

    /// Applies all writes in `batch` atomically in one remote call.
    fn batch_write(&self, spreadsheet_id: &str, batch: &BatchWrite) -> Result<(), StoreError>;

    /// Clears all values in an A1 range, leaving formatting untouched.
    fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<(), StoreError>;

    /// Enumerates the sheets of a spreadsheet in service order.
    fn list_sheets(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>, StoreError>;

    /// Adds a new, empty sheet with the given title.
    fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<(), StoreError>;
}
