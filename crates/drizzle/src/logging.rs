//! Log setup.
//!
//! The terminal belongs to the animation, so logs only go to a file, and
//! only when one is requested.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

/// Install a file logger if `log_file` is set. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init(log_file: Option<&Path>) -> color_eyre::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("starting drizzle version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
