//! Logger setup.
//!
//! The crate logs through the `log` facade. Hosts that do not install their
//! own logger can call [`init_logging`] to get an `env_logger` backend.

use log::LevelFilter;

/// Parses a level name, falling back to `Info` for unknown names.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Installs an `env_logger` backend at `level`. `RUST_LOG` still overrides
/// per-module filters. Calling it again after a logger is set is a no-op.
pub fn init_logging(level: &str) {
    let result = env_logger::Builder::new()
        .filter_level(parse_level(level))
        .parse_env("RUST_LOG")
        .format_timestamp_secs()
        .format_module_path(true)
        .try_init();

    if result.is_ok() {
        log::debug!("logging initialised at {}", level);
    }
}
