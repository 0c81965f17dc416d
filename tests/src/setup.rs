//! Per-test workspace with its own source and output files.

use std::fs;
use std::path::PathBuf;

use pipeline::PipelineConfig;
use tempfile::TempDir;

use crate::fixtures;

/// Temporary directory plus a pipeline configuration pointing into it.
pub struct TestContext {
    pub dir: TempDir,
    pub config: PipelineConfig,
}

impl TestContext {
    /// Creates a context whose source file holds `source` verbatim.
    pub fn with_source(source: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let source_path = dir.path().join("source_event_data.json");
        fs::write(&source_path, source).expect("Failed to write source file");

        let config = PipelineConfig {
            source_path,
            schema_path: fixtures::schema_path(),
            user_activities_path: dir.path().join("output").join("user_activities.csv"),
            agg_events_path: dir.path().join("output").join("agg_events.csv"),
        };

        Self { dir, config }
    }

    /// Creates a context with one JSON line per event.
    pub fn with_events(events: &[serde_json::Value]) -> Self {
        Self::with_source(&fixtures::json_lines(events))
    }

    pub fn user_activities(&self) -> String {
        fs::read_to_string(&self.config.user_activities_path).expect("user activities not written")
    }

    pub fn agg_events(&self) -> String {
        fs::read_to_string(&self.config.agg_events_path).expect("agg events not written")
    }

    pub fn outputs_exist(&self) -> bool {
        self.config.user_activities_path.exists() || self.config.agg_events_path.exists()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
