//! Projection of the clean table onto user activity rows.

use etl_core::{CleanEvent, UserActivityRow};

/// One activity row per clean event, in the same order.
pub fn project_user_activities(events: &[CleanEvent]) -> Vec<UserActivityRow> {
    events.iter().map(UserActivityRow::from).collect()
}
