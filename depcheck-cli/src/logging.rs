//! Logging setup for the depcheck CLI.
//!
//! Logs always go to stderr; stdout carries the report, CSV or JSON output.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use depcheck_core::config::GeneralConfig;

/// Log line format from `general.log_format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => anyhow::bail!("unknown log format '{other}', expected 'json' or 'pretty'"),
        }
    }
}

/// Pick the filter directive: `--log-level`, then `RUST_LOG`, then the config.
fn filter_directive(config_level: &str, cli_level: Option<&str>, env: Option<String>) -> String {
    match (cli_level, env) {
        (Some(level), _) => level.to_owned(),
        (None, Some(env)) if !env.trim().is_empty() => env,
        _ => config_level.to_owned(),
    }
}

/// Install the global subscriber. Call once, before the first event.
pub fn init_tracing(config: &GeneralConfig, cli_level: Option<&str>) -> Result<()> {
    let directive = filter_directive(
        &config.log_level,
        cli_level,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;

    let layer = fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);
    match LogFormat::parse(&config.log_format)? {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
    }
    .context("failed to initialize tracing subscriber")
}
