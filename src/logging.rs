//! Tracing subscriber setup

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Resolve the filter: `RUST_LOG` wins, then `--verbose`, then the configured level
pub fn env_filter(config: &LoggingConfig, verbose: bool) -> Result<EnvFilter> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    Ok(filter)
}

/// Install the global subscriber in the configured format
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = env_filter(config, verbose)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.format == "json" {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;
    } else {
        builder
            .pretty()
            .with_target(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;
    }

    Ok(())
}
