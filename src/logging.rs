//! Logger bootstrap for binaries.
//!
//! The library itself only logs through the `log` facade.

use env_logger::{Builder, Env};

/// Initialise `env_logger`.
///
/// `RUST_LOG` wins when set; otherwise `level` is used, raised to `debug`
/// when `verbose` is on. Calling this twice is harmless.
pub fn init(level: &str, verbose: bool) {
    let default = if verbose { "debug" } else { level };
    let _ = Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}
