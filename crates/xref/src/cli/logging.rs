//! Diagnostic logging setup.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit log filter (`info`, `xref_index=debug`, ...).
pub const LOG_ENV: &str = "XREF_LOG";

/// Installs the stderr log subscriber.
///
/// `XREF_LOG` takes precedence; otherwise the level follows the `-v` count.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("warning: logging disabled: {e}");
    }
}

/// The filter used when `XREF_LOG` is unset.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
