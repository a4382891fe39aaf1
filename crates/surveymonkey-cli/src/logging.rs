use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogFormat;

/// `RUST_LOG` wins; otherwise `-v` raises the configured filter.
pub(crate) fn init(configured_filter: &str, verbose: u8, format: LogFormat) -> Result<()> {
    let fallback = match verbose {
        0 => configured_filter.to_string(),
        1 => "surveymonkey=debug,info".to_string(),
        _ => "surveymonkey=trace,debug".to_string(),
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback))
        .with_context(|| format!("invalid log filter '{fallback}'"))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(fmt_layer.compact()).try_init(),
        LogFormat::Json => registry.with(fmt_layer.json()).try_init(),
    }
    .context("failed to install log subscriber")
}
