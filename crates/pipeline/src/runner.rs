//! End-to-end batch run.

use std::time::Instant;

use etl_core::Result;
use serde::Serialize;
use telemetry::metrics;
use tracing::{error, info, info_span};
use uuid::Uuid;

use crate::aggregate::aggregate;
use crate::clean::clean;
use crate::config::PipelineConfig;
use crate::extract::extract;
use crate::load::write_table_to_path;
use crate::project::project_user_activities;

/// Counts for one completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub lines_read: usize,
    pub malformed: usize,
    pub rejected: usize,
    pub events: usize,
    pub activity_rows: usize,
    pub agg_rows: usize,
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Run the pipeline once: extract, clean, project and aggregate, then write
/// both tables.
///
/// Both tables are computed before either file is written, so a failure in
/// any transform leaves no output behind.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let run_id = Uuid::new_v4();
    let span = info_span!("etl_run", run_id = %run_id);
    let _guard = span.enter();

    info!(
        source = %config.source_path.display(),
        schema = %config.schema_path.display(),
        "Starting ETL run"
    );

    let start = Instant::now();
    let extraction = extract(&config.source_path, &config.schema_path)?;
    metrics().extract_latency_ms.observe(elapsed_ms(start));

    let (lines_read, malformed, rejected) = (
        extraction.lines_read,
        extraction.malformed,
        extraction.rejected,
    );

    let start = Instant::now();
    let events = clean(extraction.records)?;
    let user_activities = project_user_activities(&events);
    let agg_events = aggregate(&events);
    metrics().transform_latency_ms.observe(elapsed_ms(start));

    let start = Instant::now();
    write_table_to_path(&user_activities, &config.user_activities_path)
        .inspect_err(|e| error!(path = %config.user_activities_path.display(), "Failed to write table: {}", e))?;
    metrics()
        .activity_rows_written
        .inc_by(user_activities.len() as u64);

    write_table_to_path(&agg_events, &config.agg_events_path)
        .inspect_err(|e| error!(path = %config.agg_events_path.display(), "Failed to write table: {}", e))?;
    metrics().agg_rows_written.inc_by(agg_events.len() as u64);
    metrics().load_latency_ms.observe(elapsed_ms(start));

    let summary = RunSummary {
        run_id,
        lines_read,
        malformed,
        rejected,
        events: events.len(),
        activity_rows: user_activities.len(),
        agg_rows: agg_events.len(),
    };

    info!(
        events = summary.events,
        activity_rows = summary.activity_rows,
        agg_rows = summary.agg_rows,
        "ETL run complete"
    );

    Ok(summary)
}
