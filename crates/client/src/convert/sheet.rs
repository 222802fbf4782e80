//! Spreadsheet-to-model conversion.
//!
//! Loads `.xlsx`/`.xls` workbooks into a serializable model via calamine.
//! The parse is synchronous, so it runs under `spawn_blocking` and is
//! exposed as a single-outcome awaitable.

use std::io::Cursor;

use calamine::{Data, Reader};
use serde::{Deserialize, Serialize};

use docview_core::Error;

/// One sheet: its tab name and stringified cell grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetModel {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// The displayable model of a whole workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookModel {
    pub sheets: Vec<SheetModel>,
}

impl WorkbookModel {
    /// Total number of non-empty sheets, for logging.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

/// Load a workbook model from raw spreadsheet bytes.
pub async fn load_workbook(bytes: Vec<u8>) -> Result<WorkbookModel, Error> {
    tokio::task::spawn_blocking(move || read_workbook(&bytes))
        .await
        .map_err(|e| Error::ConversionFailed(format!("spreadsheet task failed: {e}")))?
}

fn read_workbook(bytes: &[u8]) -> Result<WorkbookModel, Error> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| Error::ConversionFailed(format!("spreadsheet open failed: {e}")))?;

    let names = workbook.sheet_names().to_owned();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| Error::ConversionFailed(format!("sheet `{name}` unreadable: {e}")))?;
        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        sheets.push(SheetModel { name, rows });
    }

    if sheets.is_empty() {
        return Err(Error::ConversionFailed("workbook contains no sheets".into()));
    }

    Ok(WorkbookModel { sheets })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
