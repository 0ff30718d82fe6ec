use crate::error::{ReportError, Result};
use crate::types::{RawRecord, RawTable, RawValue};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Read a CSV export from disk and parse it into records.
pub fn load_csv(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| ReportError::Read(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| ReportError::Parse(e.to_string()))?;
    let table = parse_csv_str(&text)?;
    info!(
        path = %path.display(),
        rows = table.records.len(),
        "Loaded CSV export"
    );
    Ok(table)
}

/// Parse header-driven CSV text. Blank lines are skipped; a row whose field
/// count differs from the header aborts the parse.
pub fn parse_csv_str(text: &str) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(parse_error)?;
        let fields: HashMap<String, RawValue> = headers
            .iter()
            .zip(row.iter())
            .map(|(h, cell)| (h.clone(), RawValue::from_cell(cell)))
            .collect();
        records.push(RawRecord::new(fields));
    }

    debug!(columns = headers.len(), rows = records.len(), "Parsed CSV");
    Ok(RawTable { headers, records })
}

fn parse_error(e: csv::Error) -> ReportError {
    ReportError::Parse(e.to_string())
}
