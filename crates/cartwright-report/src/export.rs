use std::fs;
use std::path::Path;

use crate::errors::ReportError;
use crate::query::{OrderLine, COLUMNS};

/// Write the report rows as CSV at `path`, returning the bytes written.
/// An existing file is overwritten; an empty report still gets its header.
pub fn export_csv(path: &Path, rows: &[OrderLine]) -> Result<u64, ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        writer.write_record(COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(fs::metadata(path)?.len())
}
