use crate::error::{CliError, Result};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Console level for the `-v` count and `-q` flag.
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, overrides the flags.
pub fn setup_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity, quiet).into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
