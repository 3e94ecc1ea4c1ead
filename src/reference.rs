//! Column-letter arithmetic and A1 range addressing.
//!
//! Spreadsheet columns are labelled with a positional, 1-indexed counter
//! over the digits `A`-`Z` with no zero digit (`A`=1, `Z`=26, `AA`=27).
//! This module converts between letters and indexes, increments letters,
//! and parses/renders A1 ranges such as `Orders!A2:C10` or `Orders!A:A`.
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// First column letter of every sheet.
pub const FIRST_COLUMN: &str = "A";

/// Errors related to column letters and A1 range handling.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Invalid column letter '{0}'")]
    InvalidColumnLetter(String),

    #[error("Invalid range format '{0}'")]
    InvalidRange(String),
}

/// Returns the column letter following `column` (`A`->`B`, `Z`->`AA`, `AZ`->`BA`).
///
/// The letters form a base-26-like counter whose digits range over 1-26
/// with no zero, so a `Z` rolls over to `A` and carries into the next
/// position; a carry past the most significant digit prepends an `A`.
/// Lowercase input is accepted and upcased. Stateless and total over
/// non-empty `A`-`Z` strings.
pub fn next_column(column: &str) -> Result<String, ReferenceError> {
    if column.is_empty() || !column.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ReferenceError::InvalidColumnLetter(column.to_owned()));
    }
    // Least significant digit first
    let mut digits: Vec<u8> = column.to_ascii_uppercase().bytes().rev().collect();
    let mut carry = true;
    for digit in digits.iter_mut() {
        if *digit == b'Z' {
            *digit = b'A';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        digits.push(b'A');
    }
    Ok(digits.into_iter().rev().map(char::from).collect())
}

/// Converts a column letter to its 1-based index (`A`->1, `Z`->26, `AA`->27).
/// Returns `None` for an empty or non-letter string.
pub fn col_to_index(column: &str) -> Option<usize> {
    if column.is_empty() || !column.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let index = column
        .to_ascii_uppercase()
        .bytes()
        .fold(0usize, |acc, digit| {
            acc * 26 + (digit - b'A') as usize + 1
        });
    Some(index)
}

/// Converts a 1-based column index to its letter (`1`->`A`, `27`->`AA`).
/// Returns `None` for index 0.
pub fn index_to_col(index: usize) -> Option<String> {
    if index == 0 {
        return None;
    }
    let mut index = index;
    let mut digits = Vec::new();
    while index > 0 {
        index -= 1;
        digits.push(char::from(b'A' + (index % 26) as u8));
        index /= 26;
    }
    Some(digits.into_iter().rev().collect())
}

/// Converts a 1-based row label to its index. Returns `None` for an empty
/// or non-digit string, and for row 0 (A1 rows start at 1).
pub fn row_to_index(row: &str) -> Option<usize> {
    row.parse::<usize>().ok().filter(|index| *index > 0)
}

/// An A1-style cell range with an optional sheet title and optional bounds.
///
/// Renders to the exact wire notation consumed by the remote service:
/// `Orders!B3:B3` for a single cell, `Orders!A:A` for a whole column,
/// `Orders!1:1` for a whole row, `Orders!A2:C10` for a rectangle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Range {
    /// Sheet title, None for a bare range
    pub sheet: Option<String>,
    /// Leftmost column letter, None for unbounded
    pub col_lower_bound: Option<String>,
    /// Top row (1-based), None for unbounded
    pub row_lower_bound: Option<usize>,
    /// Rightmost column letter, None for unbounded
    pub col_upper_bound: Option<String>,
    /// Bottom row (1-based), None for unbounded
    pub row_upper_bound: Option<usize>,
}

impl Range {
    /// Range covering the single cell `{column}{row}`.
    pub fn cell(sheet: &str, column: &str, row: usize) -> Self {
        Range {
            sheet: Some(sheet.to_owned()),
            col_lower_bound: Some(column.to_owned()),
            row_lower_bound: Some(row),
            col_upper_bound: Some(column.to_owned()),
            row_upper_bound: Some(row),
        }
    }

    /// Range covering the header row (`Title!1:1`).
    pub fn header_row(sheet: &str) -> Self {
        Range {
            sheet: Some(sheet.to_owned()),
            row_lower_bound: Some(1),
            row_upper_bound: Some(1),
            ..Range::default()
        }
    }

    /// Range covering one entire column (`Title!A:A`).
    pub fn full_column(sheet: &str, column: &str) -> Self {
        Range {
            sheet: Some(sheet.to_owned()),
            col_lower_bound: Some(column.to_owned()),
            col_upper_bound: Some(column.to_owned()),
            ..Range::default()
        }
    }

    /// Rectangle from `{col_lower}{row_lower}` to `{col_upper}{row_upper}`.
    pub fn rect(
        sheet: &str,
        col_lower: &str,
        row_lower: usize,
        col_upper: &str,
        row_upper: usize,
    ) -> Self {
        Range {
            sheet: Some(sheet.to_owned()),
            col_lower_bound: Some(col_lower.to_owned()),
            row_lower_bound: Some(row_lower),
            col_upper_bound: Some(col_upper.to_owned()),
            row_upper_bound: Some(row_upper),
        }
    }

    /// Leftmost column as a 1-based index.
    pub fn col_lower_index(&self) -> Option<usize> {
        self.col_lower_bound.as_deref().and_then(col_to_index)
    }

    /// Rightmost column as a 1-based index.
    pub fn col_upper_index(&self) -> Option<usize> {
        self.col_upper_bound.as_deref().and_then(col_to_index)
    }
}

impl TryFrom<&str> for Range {
    type Error = ReferenceError;

    /// Parses an A1 range string with an optional `Title!` prefix.
    /// Supports single cells ("B3"), rectangles ("A2:C10"), whole columns
    /// ("A:A") and whole rows ("1:1"). A single corner with no `:` part is
    /// expanded to cover just itself.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let (sheet, body) = match value.split_once('!') {
            Some((title, body)) => (Some(title.to_owned()), body.to_ascii_uppercase()),
            None => (None, value.to_ascii_uppercase()),
        };
        let pattern =
            Regex::new(r"^([A-Z]*)(\d*)(:([A-Z]*)(\d*))?$").expect("Hardcode regex pattern");
        let captures = pattern
            .captures(body.as_str())
            .ok_or_else(|| ReferenceError::InvalidRange(value.to_owned()))?;
        let col_lower_bound = captures
            .get(1)
            .map(|matcher| matcher.as_str())
            .filter(|letters| !letters.is_empty())
            .map(str::to_owned);
        let row_lower_bound = captures
            .get(2)
            .map(|matcher| matcher.as_str())
            .and_then(row_to_index);
        if col_lower_bound.is_none() && row_lower_bound.is_none() {
            return Err(ReferenceError::InvalidRange(value.to_owned()));
        }
        let (col_upper_bound, row_upper_bound) = if captures.get(3).is_some() {
            (
                captures
                    .get(4)
                    .map(|matcher| matcher.as_str())
                    .filter(|letters| !letters.is_empty())
                    .map(str::to_owned),
                captures
                    .get(5)
                    .map(|matcher| matcher.as_str())
                    .and_then(row_to_index),
            )
        } else {
            // "B3" covers exactly itself
            (col_lower_bound.clone(), row_lower_bound)
        };
        Ok(Range {
            sheet,
            col_lower_bound,
            row_lower_bound,
            col_upper_bound,
            row_upper_bound,
        })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            write!(f, "{}!", sheet)?;
        }
        if let Some(column) = &self.col_lower_bound {
            write!(f, "{}", column)?;
        }
        if let Some(row) = self.row_lower_bound {
            write!(f, "{}", row)?;
        }
        write!(f, ":")?;
        if let Some(column) = &self.col_upper_bound {
            write!(f, "{}", column)?;
        }
        if let Some(row) = self.row_upper_bound {
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn next_column_within_one_digit() {
        assert_eq!(next_column("A").unwrap(), "B");
        assert_eq!(next_column("M").unwrap(), "N");
        assert_eq!(next_column("Y").unwrap(), "Z");
    }

    #[test]
    fn next_column_carries() {
        assert_eq!(next_column("Z").unwrap(), "AA");
        assert_eq!(next_column("AZ").unwrap(), "BA");
        assert_eq!(next_column("ZZ").unwrap(), "AAA");
        assert_eq!(next_column("AMZ").unwrap(), "ANA");
    }

    #[test]
    fn next_column_accepts_lowercase() {
        assert_eq!(next_column("az").unwrap(), "BA");
    }

    #[test]
    fn next_column_rejects_invalid_input() {
        assert!(next_column("").is_err());
        assert!(next_column("A1").is_err());
        assert!(next_column("A B").is_err());
    }

    #[test]
    fn col_to_index_decodes() {
        assert_eq!(col_to_index("A"), Some(1));
        assert_eq!(col_to_index("Z"), Some(26));
        assert_eq!(col_to_index("AA"), Some(27));
        assert_eq!(col_to_index("AZ"), Some(52));
        assert_eq!(col_to_index("ZZ"), Some(702));
        assert_eq!(col_to_index(""), None);
        assert_eq!(col_to_index("B2"), None);
    }

    #[test]
    fn index_to_col_encodes() {
        assert_eq!(index_to_col(1), Some("A".to_owned()));
        assert_eq!(index_to_col(26), Some("Z".to_owned()));
        assert_eq!(index_to_col(27), Some("AA".to_owned()));
        assert_eq!(index_to_col(702), Some("ZZ".to_owned()));
        assert_eq!(index_to_col(703), Some("AAA".to_owned()));
        assert_eq!(index_to_col(0), None);
    }

    #[test]
    fn row_to_index_rejects_non_rows() {
        assert_eq!(row_to_index("3"), Some(3));
        assert_eq!(row_to_index(""), None);
        assert_eq!(row_to_index("0"), None);
        assert_eq!(row_to_index("B"), None);
    }

    #[test]
    fn range_renders_wire_notation() {
        assert_eq!(Range::cell("Orders", "B", 3).to_string(), "Orders!B3:B3");
        assert_eq!(Range::full_column("Orders", "A").to_string(), "Orders!A:A");
        assert_eq!(Range::header_row("Orders").to_string(), "Orders!1:1");
        assert_eq!(
            Range::rect("Orders", "A", 2, "C", 10).to_string(),
            "Orders!A2:C10"
        );
    }

    #[test]
    fn range_parses_rectangle() {
        let range = Range::try_from("Orders!A2:C10").unwrap();
        assert_eq!(range.sheet.as_deref(), Some("Orders"));
        assert_eq!(range.col_lower_bound.as_deref(), Some("A"));
        assert_eq!(range.row_lower_bound, Some(2));
        assert_eq!(range.col_upper_bound.as_deref(), Some("C"));
        assert_eq!(range.row_upper_bound, Some(10));
    }

    #[test]
    fn range_parses_partial_forms() {
        let column = Range::try_from("Orders!A:A").unwrap();
        assert_eq!(column.col_lower_index(), Some(1));
        assert_eq!(column.row_lower_bound, None);
        assert_eq!(column.row_upper_bound, None);

        let row = Range::try_from("Orders!1:1").unwrap();
        assert_eq!(row.row_lower_bound, Some(1));
        assert_eq!(row.col_lower_bound, None);

        let cell = Range::try_from("b3").unwrap();
        assert_eq!(cell.sheet, None);
        assert_eq!(cell.col_upper_bound.as_deref(), Some("B"));
        assert_eq!(cell.row_upper_bound, Some(3));
    }

    #[test]
    fn range_parse_roundtrips_through_display() {
        for notation in ["Orders!B3:B3", "Orders!A:A", "Orders!1:1", "Orders!A2:C10"] {
            let range = Range::try_from(notation).unwrap();
            assert_eq!(range.to_string(), notation);
        }
    }

    #[test]
    fn range_rejects_invalid_input() {
        assert!(Range::try_from("Orders!").is_err());
        assert!(Range::try_from("").is_err());
        assert!(Range::try_from("Orders!3B").is_err());
        assert!(Range::try_from("Orders!A1:B2:C3").is_err());
    }

    proptest! {
        #[test]
        fn next_column_is_the_successor(index in 1usize..500_000) {
            let column = index_to_col(index).unwrap();
            let next = next_column(&column).unwrap();
            prop_assert_eq!(col_to_index(&next), Some(index + 1));
        }

        #[test]
        fn letters_and_indexes_roundtrip(index in 1usize..500_000) {
            let column = index_to_col(index).unwrap();
            prop_assert_eq!(col_to_index(&column), Some(index));
        }
    }
}
