use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter: engine warnings only. Activity lines already go to stdout.
const DEFAULT_FILTER: &str = "warn,replica::activity=off";

/// Initialize a tracing subscriber writing diagnostics to stderr.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` raises the level to debug,
/// including the activity lines mirrored from the logger.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let default = if verbose { "debug" } else { DEFAULT_FILTER };
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
