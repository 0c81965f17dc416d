//! Core types, URL decomposition, and schema validation for the event ETL.

pub mod error;
pub mod events;
pub mod schema;
pub mod table;
pub mod timestamp;
pub mod url_levels;

pub use error::{Error, ErrorCode, Result};
pub use events::*;
pub use schema::{is_valid_data, RecordValidator};
pub use table::TableRow;
pub use url_levels::{decompose, UrlLevels};
