//! Diagnostic logging: tracing subscriber on stderr.
//!
//! Operator-facing status lines go through `output`; this is for `--verbose`
//! and `BOTSTRAP_LOG` debugging only.

use tracing_subscriber::{EnvFilter, prelude::*};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "BOTSTRAP_LOG";

/// Filter used when `BOTSTRAP_LOG` is unset.
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "botstrap_cli=debug"
    } else {
        "warn"
    }
}

/// Initialize tracing. Call once at process startup; later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .without_time(),
        )
        .try_init();
}
