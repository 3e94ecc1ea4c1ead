use thiserror::Error;

/// Main error type for the crate.
/// Aggregates errors from the reference, store, and database modules.
#[derive(Error, Debug)]
pub enum SheetDbError {
    #[error("{0}")]
    WithContextError(String),

    // Reference module errors
    #[error("{0}")]
    ReferenceError(#[from] crate::reference::ReferenceError),

    // Store module errors
    #[error("{0}")]
    StoreError(#[from] crate::store::StoreError),

    // Database module errors
    #[error("{0}")]
    ColumnError(#[from] crate::database::column::ColumnError),

    #[error("{0}")]
    TableError(#[from] crate::database::table::TableError),

    #[error("{0}")]
    DatabaseError(#[from] crate::database::DatabaseError),
}

pub(crate) trait ResultMessage<T> {
    fn with_prefix(self, message: &str) -> Result<T, SheetDbError>;
}

impl<T, E> ResultMessage<T> for Result<T, E>
where
    SheetDbError: From<E>,
{
    fn with_prefix(self, message: &str) -> Result<T, SheetDbError> {
        self.map_err(|e| {
            SheetDbError::WithContextError(format!("{}: {}", message, SheetDbError::from(e)))
        })
    }
}
