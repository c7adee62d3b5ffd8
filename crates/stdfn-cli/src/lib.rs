//! # stdfn-cli — Command Handlers
//!
//! Subcommand arguments and handlers for the `stdfn` binary. Each handler
//! builds a validated function, calls it once, and reports the outcome.

pub mod check;
pub mod report;
pub mod todo;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Logs go to
/// stderr so command output on stdout stays machine-readable.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
