//! Writing tables as comma-delimited text.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use etl_core::{Error, Result, TableRow};
use tracing::info;

/// Serialize `rows` to `dest` with a header row and no index column.
///
/// The header is written even when there are no rows.
pub fn write_table<R: TableRow, W: Write>(rows: &[R], dest: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(dest);

    writer
        .write_record(R::COLUMNS)
        .map_err(|e| Error::output(format!("failed to write header: {}", e)))?;

    for (i, row) in rows.iter().enumerate() {
        writer
            .serialize(row)
            .map_err(|e| Error::output(format!("failed to write row {}: {}", i, e)))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a table to a file, creating missing parent directories.
pub fn write_table_to_path<R: TableRow>(rows: &[R], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_table(rows, BufWriter::new(file))?;

    info!(path = %path.display(), rows = rows.len(), "Wrote table");
    Ok(())
}
