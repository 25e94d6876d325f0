use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// The Mongo driver logs every pool event at debug; keep it quiet unless asked.
const DRIVER_DIRECTIVE: &str = "mongodb=warn";

pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(default_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn default_directives(level: &str) -> String {
    if level.contains("mongodb") {
        return level.to_string();
    }
    format!("{level},{DRIVER_DIRECTIVE}")
}
