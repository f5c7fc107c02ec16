//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Log to stderr. `DIAMOND_LOG` wins over `RUST_LOG`; the default shows
/// warnings and errors only, `--verbose` shows everything down to debug.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("DIAMOND_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}
