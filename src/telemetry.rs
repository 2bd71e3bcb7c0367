//! Tracing initialization for the command-line tool.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the tracing subscriber, writing to stderr.
///
/// The filter comes from `RUST_LOG` when set. Otherwise it is `warn`, or
/// `envseal=debug` when `verbose` is true.
///
/// # Errors
///
/// Returns an error if the tracing subscriber fails to initialize.
pub fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let env_filter = create_env_filter(verbose)?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(())
}

fn create_env_filter(verbose: bool) -> anyhow::Result<EnvFilter> {
    let fallback = if verbose { "warn,envseal=debug" } else { "warn" };
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {e}"))
}
