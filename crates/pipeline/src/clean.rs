//! Cleaning of raw events into the canonical clean table.

use etl_core::{CleanEvent, RawEvent, Result};
use telemetry::metrics;
use tracing::{debug, error};

/// Flatten and type every raw event.
///
/// Order preserving and one-to-one: a record that cannot be cleaned fails the
/// whole stage rather than being dropped.
pub fn clean(raw: Vec<RawEvent>) -> Result<Vec<CleanEvent>> {
    let total = raw.len();
    let mut events = Vec::with_capacity(total);

    for (i, record) in raw.into_iter().enumerate() {
        let event_id = record.event_id.clone();
        match CleanEvent::from_raw(record) {
            Ok(event) => events.push(event),
            Err(e) => {
                error!(index = i, event_id = %event_id, code = e.error_code(), "Failed to clean event: {}", e);
                return Err(e);
            }
        }
    }

    metrics().events_cleaned.inc_by(events.len() as u64);
    debug!(count = total, "Cleaned events");
    Ok(events)
}
