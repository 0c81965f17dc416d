//! Extract, transform and load stages for the event ETL.
//!
//! One linear batch run:
//! - Extract (JSON lines -> schema-validated raw events)
//! - Clean (raw events -> flattened, typed clean events)
//! - Project (clean events -> user activity rows)
//! - Aggregate (clean events -> hourly bucket counts)
//! - Load (tables -> CSV files)

pub mod aggregate;
pub mod clean;
pub mod config;
pub mod extract;
pub mod load;
pub mod project;
pub mod runner;

pub use aggregate::aggregate;
pub use clean::clean;
pub use config::PipelineConfig;
pub use extract::{extract, extract_from_reader, Extraction};
pub use load::{write_table, write_table_to_path};
pub use project::project_user_activities;
pub use runner::{run, RunSummary};
