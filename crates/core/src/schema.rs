//! JSON Schema validation for source records.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// A compiled schema applied as a predicate to each record.
///
/// Built once per run; compiling checks the schema document itself, so an
/// invalid schema is rejected before any record is looked at.
pub struct RecordValidator {
    validator: Validator,
}

impl RecordValidator {
    /// Compile a schema document.
    pub fn new(schema: &Value) -> Result<Self> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| Error::invalid_schema(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Load and compile a schema file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::open(path, e))?;
        let schema: Value = serde_json::from_reader(BufReader::new(file))?;
        Self::new(&schema)
    }

    /// Check a document, returning the first violation.
    pub fn validate(&self, doc: &Value) -> Result<()> {
        match self.validator.iter_errors(doc).next() {
            None => Ok(()),
            Some(e) => Err(Error::schema_violation(e.to_string())),
        }
    }

    /// Whether a document conforms. Violations are logged at warn level.
    pub fn is_valid(&self, doc: &Value) -> bool {
        match self.validate(doc) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Error validating record against schema");
                false
            }
        }
    }
}

impl fmt::Debug for RecordValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordValidator").finish_non_exhaustive()
    }
}

/// Validate a single document against a schema document.
///
/// Returns `Ok(false)` for a document that violates a well-formed schema and
/// `Err(Error::InvalidSchema)` when the schema itself is malformed.
pub fn is_valid_data(doc: &Value, schema: &Value) -> Result<bool> {
    Ok(RecordValidator::new(schema)?.is_valid(doc))
}
