use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::errors::{Result, TemporalError};

/// Installs the fmt subscriber. `tempora::init` calls this with the level
/// read from `TEMPORA_LOG`, so parser traces and configuration loading are
/// visible to the embedding program.
///
/// `RUST_LOG` takes precedence; otherwise `level` (or `info`) is used.
pub fn init_tracing(level: Option<&str>) -> Result<()> {
    let default_level = level.unwrap_or("info");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(atty::is(atty::Stream::Stdout))
        .try_init()
        .map_err(|err| TemporalError::GeneralError(err.to_string()))?;

    Ok(())
}
