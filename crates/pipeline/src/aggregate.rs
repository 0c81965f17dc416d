//! Hourly aggregation of clean events.
//!
//! Groups by `(time_bucket, url_level1, url_level2, activity)` and counts
//! events and distinct users per group. Output is sorted by the group key.

use std::collections::{BTreeMap, HashSet};

use etl_core::timestamp::time_bucket;
use etl_core::{AggEventRow, CleanEvent};
use tracing::debug;

/// Grouping key. Field order defines output sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    time_bucket: String,
    url_level1: String,
    url_level2: String,
    activity: String,
}

/// Running counts for one group.
#[derive(Debug, Default)]
struct Accumulator {
    activity_count: u64,
    users: HashSet<i64>,
}

impl Accumulator {
    fn add(&mut self, user_id: i64) {
        self.activity_count += 1;
        self.users.insert(user_id);
    }
}

/// Aggregate clean events into bucketed counts.
///
/// Events missing `url_level1` or `url_level2` belong to no group and are
/// left out, matching group-by semantics over nullable keys.
pub fn aggregate(events: &[CleanEvent]) -> Vec<AggEventRow> {
    let mut groups: BTreeMap<GroupKey, Accumulator> = BTreeMap::new();
    let mut ungrouped = 0usize;

    for event in events {
        let (Some(level1), Some(level2)) = (&event.url_level1, &event.url_level2) else {
            ungrouped += 1;
            continue;
        };

        let key = GroupKey {
            time_bucket: time_bucket(&event.time_stamp),
            url_level1: level1.clone(),
            url_level2: level2.clone(),
            activity: event.activity.clone(),
        };
        groups.entry(key).or_default().add(event.user_id);
    }

    if ungrouped > 0 {
        debug!(count = ungrouped, "Events without url levels excluded from aggregation");
    }

    groups
        .into_iter()
        .map(|(key, acc)| AggEventRow {
            time_bucket: key.time_bucket,
            url_level1: key.url_level1,
            url_level2: key.url_level2,
            activity: key.activity,
            activity_count: acc.activity_count,
            user_count: acc.users.len() as u64,
        })
        .collect()
}
