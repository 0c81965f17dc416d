//! Event ETL
//!
//! Batch pipeline turning a line-delimited JSON event feed into:
//! - a per-event user activity table
//! - an hourly aggregate of activity and distinct users per URL section

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};

use pipeline::PipelineConfig;
use telemetry::{init_tracing_from_env, metrics};

/// Application configuration.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default)]
    pipeline: PipelineConfig,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting event ETL v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    let result = pipeline::run(&config.pipeline);

    let snapshot = metrics().snapshot();
    info!(
        metrics = %serde_json::to_string(&snapshot).unwrap_or_default(),
        "Run metrics"
    );

    match result {
        Ok(summary) => {
            info!(
                run_id = %summary.run_id,
                malformed = summary.malformed,
                rejected = summary.rejected,
                "Done"
            );
            Ok(())
        }
        Err(e) => {
            error!(code = e.error_code(), "ETL run aborted: {}", e);
            Err(e).context("ETL run failed")
        }
    }
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables, e.g. ETL__PIPELINE__SOURCE_PATH
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("ETL")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Flat overrides for the common case
    if let Ok(path) = std::env::var("ETL_SOURCE_PATH") {
        config.pipeline.source_path = PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("ETL_SCHEMA_PATH") {
        config.pipeline.schema_path = PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("ETL_USER_ACTIVITIES_PATH") {
        config.pipeline.user_activities_path = PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("ETL_AGG_EVENTS_PATH") {
        config.pipeline.agg_events_path = PathBuf::from(path);
    }

    Ok(config)
}
