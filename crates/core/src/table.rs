//! Column contract for rows written as delimited tables.

use serde::Serialize;

/// A row type that serializes to a fixed, ordered set of columns.
///
/// `COLUMNS` must list the serialized field names in declaration order; the
/// writer emits it as the header row.
pub trait TableRow: Serialize {
    const COLUMNS: &'static [&'static str];
}
