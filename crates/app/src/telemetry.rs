//! Tracing setup for the desktop binary.
//!
//! `LOG_LEVEL` takes `EnvFilter` directives such as
//! `"info,services=debug,storage=debug"`. `LOG_FORMAT=json` switches to
//! structured output; anything else keeps the human-readable format.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,services=debug,storage=debug";

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
