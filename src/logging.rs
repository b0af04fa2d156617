use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// `RUST_LOG` wins; otherwise `level` applies to this crate and HTTP tracing.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = level.trim().to_ascii_lowercase();
    EnvFilter::try_new(format!("warn,quizmate={level},tower_http={level}"))
        .with_context(|| format!("Invalid log level '{level}'"))
}

pub fn init(level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(build_filter(level)?)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}
