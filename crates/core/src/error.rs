//! Unified error types for the event ETL.
//!
//! Error codes:
//! - ETL_001: Malformed record (per-line JSON decode failure)
//! - ETL_002: Schema violation (record does not match the schema)
//! - ETL_003: Invalid schema definition
//! - ETL_004: Source or schema file not found
//! - ETL_005: Invalid timestamp in a validated record
//! - ETL_006: Unexpected I/O, parsing or output failure

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes, one per entry of the failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// ETL_001: A source line is not valid JSON
    MalformedRecord,
    /// ETL_002: A record does not conform to the schema
    SchemaViolation,
    /// ETL_003: The schema document is not a valid JSON Schema
    InvalidSchema,
    /// ETL_004: Source or schema file is missing
    SourceNotFound,
    /// ETL_005: A record timestamp cannot be parsed
    InvalidTimestamp,
    /// ETL_006: Any other failure
    Unexpected,
}

impl ErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedRecord => "ETL_001",
            Self::SchemaViolation => "ETL_002",
            Self::InvalidSchema => "ETL_003",
            Self::SourceNotFound => "ETL_004",
            Self::InvalidTimestamp => "ETL_005",
            Self::Unexpected => "ETL_006",
        }
    }

    /// Whether an error of this kind aborts the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MalformedRecord | Self::SchemaViolation)
    }
}

/// Unified error type for the event ETL.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("schema violation: {0}")]
    SchemaViolation(String),

    #[error("invalid schema definition: {0}")]
    InvalidSchema(String),

    #[error("file not found: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("output error: {0}")]
    Output(String),
}

impl Error {
    pub fn malformed_record(line: usize, msg: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: msg.into(),
        }
    }

    pub fn schema_violation(msg: impl Into<String>) -> Self {
        Self::SchemaViolation(msg.into())
    }

    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        Self::InvalidSchema(msg.into())
    }

    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp(value.into())
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Wraps an I/O error raised while opening `path`, mapping a missing file
    /// to [`Error::SourceNotFound`].
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::SourceNotFound {
                path: path.into(),
                source,
            }
        } else {
            Self::Io(source)
        }
    }

    /// Get the taxonomy code for this error.
    pub fn kind(&self) -> ErrorCode {
        match self {
            Self::MalformedRecord { .. } => ErrorCode::MalformedRecord,
            Self::SchemaViolation(_) => ErrorCode::SchemaViolation,
            Self::InvalidSchema(_) => ErrorCode::InvalidSchema,
            Self::SourceNotFound { .. } => ErrorCode::SourceNotFound,
            Self::InvalidTimestamp(_) => ErrorCode::InvalidTimestamp,
            Self::Io(_) | Self::Serialization(_) | Self::Output(_) => ErrorCode::Unexpected,
        }
    }

    /// Get the error code string.
    pub fn error_code(&self) -> &'static str {
        self.kind().code()
    }

    /// Whether this error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        self.kind().is_fatal()
    }
}
