//! Pipeline configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Input and output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Newline-delimited JSON event feed
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,
    /// JSON Schema describing one source event
    #[serde(default = "default_schema_path")]
    pub schema_path: PathBuf,
    /// Destination of the per-event user activity table
    #[serde(default = "default_user_activities_path")]
    pub user_activities_path: PathBuf,
    /// Destination of the aggregate events table
    #[serde(default = "default_agg_events_path")]
    pub agg_events_path: PathBuf,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("data/source_event_data.json")
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("data/source_data_schema.json")
}

fn default_user_activities_path() -> PathBuf {
    PathBuf::from("output/user_activities.csv")
}

fn default_agg_events_path() -> PathBuf {
    PathBuf::from("output/agg_events.csv")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            schema_path: default_schema_path(),
            user_activities_path: default_user_activities_path(),
            agg_events_path: default_agg_events_path(),
        }
    }
}
