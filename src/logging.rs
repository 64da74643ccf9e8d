//! Session logging
//!
//! Everything goes to the workspace `log` file next to the compiler
//! diagnostics; the terminal belongs to the editor.
//!
//! Filtering:
//! - `LIVID_LOG=debug` - any `EnvFilter` directive
//! - otherwise `-v` picks the level (info, debug, trace)

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "LIVID_LOG";

/// Install the global subscriber writing to `log`
pub fn init(log: File, verbosity: u8) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).try_init()
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "livid=info",
        1 => "livid=debug",
        _ => "livid=trace",
    }
}
