//! In-memory [`ValueStore`] implementation.
//!
//! Backs the table layer with a plain cell grid so the crate can be
//! exercised without a remote service. Mirrors the remote contract's
//! observable behavior: absent ranges read as empty, trailing blank cells
//! and rows are trimmed from read results, and writes grow the grid as
//! needed. Every mutation is recorded in a journal so tests can assert the
//! exact wire ranges an operation produced.
use crate::reference::Range;
use crate::store::{BatchWrite, SheetProperties, StoreError, ValueStore};
use anyhow::anyhow;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

/// One sheet's cell grid. `None` marks a blank cell.
struct MemorySheet {
    title: String,
    rows: Vec<Vec<Option<Value>>>,
}

/// In-process spreadsheet store keyed by spreadsheet id.
#[derive(Default)]
pub struct MemoryStore {
    spreadsheets: Mutex<HashMap<String, Vec<MemorySheet>>>,
    journal: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces (or creates) a sheet with the given rows. `Value::Null`
    /// cells are stored as blanks.
    pub fn seed_sheet(&self, spreadsheet_id: &str, title: &str, rows: Vec<Vec<Value>>) {
        let rows: Vec<Vec<Option<Value>>> = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|value| match value {
                        Value::Null => None,
                        value => Some(value),
                    })
                    .collect()
            })
            .collect();
        let mut spreadsheets = self.spreadsheets.lock();
        let sheets = spreadsheets.entry(spreadsheet_id.to_owned()).or_default();
        match sheets.iter_mut().find(|sheet| sheet.title == title) {
            Some(sheet) => sheet.rows = rows,
            None => sheets.push(MemorySheet {
                title: title.to_owned(),
                rows,
            }),
        }
    }

    /// Dense snapshot of a sheet's grid with blanks as empty strings.
    /// Returns `None` if the spreadsheet or sheet is unknown.
    pub fn sheet_rows(&self, spreadsheet_id: &str, title: &str) -> Option<Vec<Vec<Value>>> {
        let spreadsheets = self.spreadsheets.lock();
        let sheet = spreadsheets
            .get(spreadsheet_id)?
            .iter()
            .find(|sheet| sheet.title == title)?;
        let rows = sheet
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| dense_cell(cell.as_ref())).collect())
            .collect();
        Some(rows)
    }

    /// Mutations recorded so far, in call order.
    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().clone()
    }

    fn record(&self, entry: String) {
        self.journal.lock().push(entry);
    }
}

/// Blank cells read back as empty strings, the way the remote service
/// reports a cell holding no value inside a populated range.
fn dense_cell(cell: Option<&Value>) -> Value {
    cell.cloned().unwrap_or_else(|| Value::String(String::new()))
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(text) if text.is_empty())
}

/// Parses a wire range and requires it to name a sheet.
fn parse_range(range: &str) -> Result<(String, Range), StoreError> {
    let parsed = Range::try_from(range).map_err(anyhow::Error::new)?;
    let title = parsed
        .sheet
        .clone()
        .ok_or_else(|| anyhow!("Range '{}' does not name a sheet", range))?;
    Ok((title, parsed))
}

fn read_rows(sheet: &MemorySheet, range: &Range) -> Vec<Vec<Value>> {
    let row_lower = range.row_lower_bound.unwrap_or(1);
    let row_upper = range.row_upper_bound.unwrap_or(sheet.rows.len());
    let col_lower = range.col_lower_index().unwrap_or(1);
    let mut table = Vec::new();
    for row_id in row_lower..=row_upper.min(sheet.rows.len()) {
        let cells = &sheet.rows[row_id - 1];
        let col_upper = range.col_upper_index().unwrap_or(cells.len());
        let mut record = Vec::new();
        for col_id in col_lower..=col_upper.min(cells.len()) {
            record.push(dense_cell(cells[col_id - 1].as_ref()));
        }
        while record.last().map(is_blank).unwrap_or(false) {
            record.pop();
        }
        table.push(record);
    }
    while table.last().map(|record| record.is_empty()).unwrap_or(false) {
        table.pop();
    }
    table
}

impl ValueStore for MemoryStore {
    fn read_range(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<Value>>, StoreError> {
        let (title, range) = parse_range(range)?;
        let spreadsheets = self.spreadsheets.lock();
        let sheet = spreadsheets
            .get(spreadsheet_id)
            .and_then(|sheets| sheets.iter().find(|sheet| sheet.title == title));
        // Absent ranges read as empty, never as an error
        Ok(sheet.map(|sheet| read_rows(sheet, &range)).unwrap_or_default())
    }

    fn batch_write(&self, spreadsheet_id: &str, batch: &BatchWrite) -> Result<(), StoreError> {
        let mut spreadsheets = self.spreadsheets.lock();
        let sheets = spreadsheets
            .get_mut(spreadsheet_id)
            .ok_or_else(|| anyhow!("Unknown spreadsheet '{}'", spreadsheet_id))?;
        let mut written = Vec::new();
        for value_range in &batch.data {
            let (title, range) = parse_range(&value_range.range)?;
            let sheet = sheets
                .iter_mut()
                .find(|sheet| sheet.title == title)
                .ok_or_else(|| anyhow!("Unknown sheet '{}'", title))?;
            let row_anchor = range.row_lower_bound.unwrap_or(1);
            let col_anchor = range.col_lower_index().unwrap_or(1);
            for (row_offset, values) in value_range.values.iter().enumerate() {
                let row_index = row_anchor - 1 + row_offset;
                if sheet.rows.len() <= row_index {
                    sheet.rows.resize_with(row_index + 1, Vec::new);
                }
                let cells = &mut sheet.rows[row_index];
                for (col_offset, value) in values.iter().enumerate() {
                    let col_index = col_anchor - 1 + col_offset;
                    if cells.len() <= col_index {
                        cells.resize_with(col_index + 1, || None);
                    }
                    cells[col_index] = Some(value.clone());
                }
            }
            written.push(value_range.range.clone());
        }
        drop(spreadsheets);
        for range in written {
            self.record(format!("batch_write {}", range));
        }
        Ok(())
    }

    fn clear_range(&self, spreadsheet_id: &str, range: &str) -> Result<(), StoreError> {
        let (title, parsed) = parse_range(range)?;
        let mut spreadsheets = self.spreadsheets.lock();
        let sheet = spreadsheets
            .get_mut(spreadsheet_id)
            .and_then(|sheets| sheets.iter_mut().find(|sheet| sheet.title == title))
            .ok_or_else(|| anyhow!("Unknown sheet '{}'", title))?;
        let row_lower = parsed.row_lower_bound.unwrap_or(1);
        let row_upper = parsed.row_upper_bound.unwrap_or(sheet.rows.len());
        let col_lower = parsed.col_lower_index().unwrap_or(1);
        for row_id in row_lower..=row_upper.min(sheet.rows.len()) {
            let cells = &mut sheet.rows[row_id - 1];
            let col_upper = parsed.col_upper_index().unwrap_or(cells.len());
            for col_id in col_lower..=col_upper.min(cells.len()) {
                cells[col_id - 1] = None;
            }
        }
        drop(spreadsheets);
        self.record(format!("clear_range {}", range));
        Ok(())
    }

    fn list_sheets(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>, StoreError> {
        let spreadsheets = self.spreadsheets.lock();
        let titles = spreadsheets
            .get(spreadsheet_id)
            .map(|sheets| {
                sheets
                    .iter()
                    .map(|sheet| SheetProperties {
                        title: sheet.title.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(titles)
    }

    fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<(), StoreError> {
        let mut spreadsheets = self.spreadsheets.lock();
        let sheets = spreadsheets.entry(spreadsheet_id.to_owned()).or_default();
        if sheets.iter().any(|sheet| sheet.title == title) {
            return Err(anyhow!("Sheet '{}' already exists remotely", title).into());
        }
        sheets.push(MemorySheet {
            title: title.to_owned(),
            rows: Vec::new(),
        });
        drop(spreadsheets);
        self.record(format!("add_sheet {}", title));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::store::ValueInputOption;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.seed_sheet(
            "book",
            "Orders",
            vec![
                vec![json!("id"), json!("name")],
                vec![json!(1), json!("Alice")],
                vec![json!(2), json!("Bob")],
            ],
        );
        store
    }

    #[test]
    fn reads_a_rectangle() {
        let store = seeded();
        let rows = store.read_range("book", "Orders!A1:B2").unwrap();
        assert_eq!(
            rows,
            vec![
                vec![json!("id"), json!("name")],
                vec![json!(1), json!("Alice")],
            ]
        );
    }

    #[test]
    fn reads_a_full_column() {
        let store = seeded();
        let rows = store.read_range("book", "Orders!A:A").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec![json!(2)]);
    }

    #[test]
    fn read_trims_trailing_blanks() {
        let store = MemoryStore::new();
        store.seed_sheet(
            "book",
            "Orders",
            vec![
                vec![json!("id"), json!("name")],
                vec![json!(1), Value::Null],
                vec![Value::Null, Value::Null],
            ],
        );
        let rows = store.read_range("book", "Orders!A1:B3").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec![json!(1)]);
    }

    #[test]
    fn absent_ranges_read_as_empty() {
        let store = seeded();
        assert!(store.read_range("nope", "Orders!A1:B2").unwrap().is_empty());
        assert!(store.read_range("book", "Nope!A1:B2").unwrap().is_empty());
        assert!(store.read_range("book", "Orders!A10:B20").unwrap().is_empty());
    }

    #[test]
    fn batch_write_grows_the_grid() {
        let store = seeded();
        let batch = BatchWrite {
            value_input_option: ValueInputOption::UserEntered,
            data: vec![
                crate::store::ValueRange {
                    range: "Orders!B5:B5".to_owned(),
                    values: vec![vec![json!("Carol")]],
                },
            ],
        };
        store.batch_write("book", &batch).unwrap();
        let rows = store.sheet_rows("book", "Orders").unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4], vec![json!(""), json!("Carol")]);
        assert_eq!(store.journal(), vec!["batch_write Orders!B5:B5".to_owned()]);
    }

    #[test]
    fn batch_write_to_unknown_sheet_fails() {
        let store = seeded();
        let batch = BatchWrite {
            value_input_option: ValueInputOption::Raw,
            data: vec![crate::store::ValueRange {
                range: "Nope!A1:A1".to_owned(),
                values: vec![vec![json!("x")]],
            }],
        };
        assert!(store.batch_write("book", &batch).is_err());
    }

    #[test]
    fn clear_range_blanks_cells_in_place() {
        let store = seeded();
        store.clear_range("book", "Orders!A2:B3").unwrap();
        let rows = store.sheet_rows("book", "Orders").unwrap();
        assert_eq!(rows[0], vec![json!("id"), json!("name")]);
        assert_eq!(rows[1], vec![json!(""), json!("")]);
        assert_eq!(rows[2], vec![json!(""), json!("")]);
    }

    #[test]
    fn add_sheet_then_list_preserves_order() {
        let store = MemoryStore::new();
        store.add_sheet("book", "Orders").unwrap();
        store.add_sheet("book", "Users").unwrap();
        let titles: Vec<String> = store
            .list_sheets("book")
            .unwrap()
            .into_iter()
            .map(|sheet| sheet.title)
            .collect();
        assert_eq!(titles, vec!["Orders".to_owned(), "Users".to_owned()]);
        assert!(store.add_sheet("book", "Orders").is_err());
    }
}
