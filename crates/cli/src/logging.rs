//! Diagnostic logging to stderr
//!
//! `RUST_LOG` wins when set; otherwise `-v` enables debug and `-vv` trace
//! output for the typegate crates.

use tracing_subscriber::EnvFilter;

pub fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "typegate=debug,typegate_cli=debug,typegate_core=debug",
        _ => "typegate=trace,typegate_cli=trace,typegate_core=trace",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
