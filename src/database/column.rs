//! Column name to column letter mapping.
use crate::error::SheetDbError;
use crate::reference::{next_column, FIRST_COLUMN};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Errors related to column schema construction.
#[derive(Error, Debug)]
pub enum ColumnError {
    #[error("Duplicate column name '{0}'")]
    DuplicateName(String),
}

/// Bijection between column names and column letters for one sheet.
///
/// Names come from the header row (or a caller-supplied list) and are
/// assigned letters left to right starting at `A`. Both directions are
/// unique, and the mapping is immutable once built: appending rows never
/// changes the schema, and there is no column add/remove.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Column names in header order
    names: Vec<String>,
    /// column name -> column letter
    letters_by_name: HashMap<String, String>,
    /// column letter -> column name
    names_by_letter: HashMap<String, String>,
}

impl ColumnMapping {
    /// Builds a mapping from an ordered list of column names, assigning
    /// `A`, `B`, ... in list order. Fails on a repeated name.
    pub fn from_names<I, T>(names: I) -> Result<Self, SheetDbError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut mapping = ColumnMapping::default();
        let mut letter = FIRST_COLUMN.to_owned();
        for name in names {
            let name: String = name.into();
            if mapping.letters_by_name.contains_key(&name) {
                return Err(ColumnError::DuplicateName(name).into());
            }
            mapping.names.push(name.clone());
            mapping.names_by_letter.insert(letter.clone(), name.clone());
            mapping.letters_by_name.insert(name, letter.clone());
            letter = next_column(&letter)?;
        }
        Ok(mapping)
    }

    /// Builds a mapping from the cell values of a header row. String cells
    /// are used verbatim; other scalars use their JSON rendering.
    pub fn from_header_row(header: &[Value]) -> Result<Self, SheetDbError> {
        Self::from_names(header.iter().map(|cell| match cell {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        }))
    }

    /// Column letter for a name.
    pub fn letter(&self, name: &str) -> Option<&str> {
        self.letters_by_name.get(name).map(String::as_str)
    }

    /// Column name for a letter.
    pub fn name(&self, letter: &str) -> Option<&str> {
        self.names_by_letter.get(letter).map(String::as_str)
    }

    /// Column names in header order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// (name, letter) pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.names.iter().map(move |name| {
            let letter = self
                .letters_by_name
                .get(name)
                .map(String::as_str)
                .unwrap_or(FIRST_COLUMN);
            (name.as_str(), letter)
        })
    }

    /// Letter of the rightmost mapped column, if any.
    pub fn last_letter(&self) -> Option<&str> {
        self.names.last().and_then(|name| self.letter(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assigns_letters_in_order() {
        let mapping = ColumnMapping::from_names(["id", "name", "email"]).unwrap();
        assert_eq!(mapping.letter("id"), Some("A"));
        assert_eq!(mapping.letter("name"), Some("B"));
        assert_eq!(mapping.letter("email"), Some("C"));
        assert_eq!(mapping.name("B"), Some("name"));
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.last_letter(), Some("C"));
    }

    #[test]
    fn preserves_header_order() {
        let mapping = ColumnMapping::from_names(["z", "a", "m"]).unwrap();
        assert_eq!(mapping.names(), &["z", "a", "m"]);
        let pairs: Vec<(&str, &str)> = mapping.iter().collect();
        assert_eq!(pairs, vec![("z", "A"), ("a", "B"), ("m", "C")]);
    }

    #[test]
    fn continues_past_column_z() {
        let names: Vec<String> = (0..28).map(|n| format!("col{}", n)).collect();
        let mapping = ColumnMapping::from_names(names).unwrap();
        assert_eq!(mapping.letter("col25"), Some("Z"));
        assert_eq!(mapping.letter("col26"), Some("AA"));
        assert_eq!(mapping.letter("col27"), Some("AB"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = ColumnMapping::from_names(["id", "name", "id"]);
        assert!(matches!(
            result,
            Err(SheetDbError::ColumnError(ColumnError::DuplicateName(name))) if name == "id"
        ));
    }

    #[test]
    fn builds_from_header_cells() {
        let header = vec![json!("id"), json!("name"), json!(42)];
        let mapping = ColumnMapping::from_header_row(&header).unwrap();
        assert_eq!(mapping.letter("id"), Some("A"));
        assert_eq!(mapping.letter("42"), Some("C"));
    }

    #[test]
    fn empty_header_yields_empty_mapping() {
        let mapping = ColumnMapping::from_header_row(&[]).unwrap();
        assert!(mapping.is_empty());
        assert_eq!(mapping.last_letter(), None);
    }
}
