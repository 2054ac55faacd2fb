use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Initialize a tracing subscriber writing to stderr.
///
/// It uses the `RUST_LOG` environment variable to determine the log level,
/// defaulting to "info", or "debug" when `verbose` is set.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| CliError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_installs_a_global_subscriber_once() {
        // Another test may have installed the subscriber already
        let first = init(false);
        if let Err(e) = &first {
            assert!(matches!(e, CliError::Logging(_)), "unexpected error: {e}");
        }
        assert!(tracing::dispatcher::has_been_set());

        let second = init(true);
        assert!(matches!(second, Err(CliError::Logging(_))));

        tracing::info!("logging initialised");
    }
}
