//! CSV row parsing for table rendering.
//!
//! No header inference: every line is a data row. Empty lines are
//! skipped by the reader. Rows may have uneven field counts.

use docview_core::Error;

/// Parse CSV bytes into rows of cells.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::ConversionFailed(format!("csv parse failed: {e}")))?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    Ok(rows)
}
