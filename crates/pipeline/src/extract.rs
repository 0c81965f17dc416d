//! Extraction of schema-valid events from a JSON lines feed.
//!
//! Per-line problems (bad JSON, schema violations) are logged and skipped.
//! Missing files, an invalid schema and read failures abort extraction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use etl_core::{Error, RawEvent, RecordValidator, Result};
use serde_json::Value;
use telemetry::metrics;
use tracing::{debug, error, info, warn};

/// Valid records from one source, in input order, with line accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<RawEvent>,
    /// Non-blank lines seen
    pub lines_read: usize,
    /// Lines that were not valid JSON
    pub malformed: usize,
    /// Well-formed documents dropped for not matching the schema
    pub rejected: usize,
}

impl Extraction {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Extract valid events from `source` using the schema at `schema`.
///
/// The schema is loaded and compiled before the source is opened, so an
/// invalid schema fails the run without reading any record.
pub fn extract(source: impl AsRef<Path>, schema: impl AsRef<Path>) -> Result<Extraction> {
    let source = source.as_ref();
    let schema = schema.as_ref();

    let result = RecordValidator::from_path(schema).and_then(|validator| {
        let file = File::open(source).map_err(|e| Error::open(source, e))?;
        extract_from_reader(BufReader::new(file), &validator)
    });

    match &result {
        Ok(extraction) => info!(
            source = %source.display(),
            lines = extraction.lines_read,
            valid = extraction.len(),
            malformed = extraction.malformed,
            rejected = extraction.rejected,
            "Extraction complete"
        ),
        Err(e @ Error::SourceNotFound { .. }) => {
            error!(code = e.error_code(), "File not found error: {}", e)
        }
        Err(e) => error!(code = e.error_code(), "Extraction failed: {}", e),
    }

    result
}

/// Extract valid events from an already opened JSON lines reader.
pub fn extract_from_reader<R: BufRead>(reader: R, validator: &RecordValidator) -> Result<Extraction> {
    let mut extraction = Extraction::default();

    // Split on raw bytes so a line that is not UTF-8 is a per-line decode
    // failure rather than a read error.
    for (idx, line) in reader.split(b'\n').enumerate() {
        let line_no = idx + 1;
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        if line.iter().all(u8::is_ascii_whitespace) {
            debug!(line = line_no, "Skipping blank line");
            continue;
        }
        extraction.lines_read += 1;
        metrics().lines_read.inc();

        let doc: Value = match serde_json::from_slice(&line) {
            Ok(doc) => doc,
            Err(e) => {
                let err = Error::malformed_record(line_no, e.to_string());
                error!(code = err.error_code(), "Error parsing json: {}", err);
                extraction.malformed += 1;
                metrics().records_malformed.inc();
                continue;
            }
        };

        if !validator.is_valid(&doc) {
            extraction.rejected += 1;
            metrics().records_rejected.inc();
            continue;
        }

        match RawEvent::from_value(doc) {
            Ok(event) => extraction.records.push(event),
            Err(e) => {
                warn!(line = line_no, code = e.error_code(), "Dropping undecodable record: {}", e);
                extraction.rejected += 1;
                metrics().records_rejected.inc();
            }
        }
    }

    metrics().records_extracted.inc_by(extraction.len() as u64);
    Ok(extraction)
}
