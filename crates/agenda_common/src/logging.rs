//! Logging utilities for the Agenda services.
//!
//! Every binary calls [`init`] (or [`init_with_level`]) once at start-up; library
//! code only uses the `tracing` macros.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO for the `agenda` crates.
///
/// # Examples
///
/// ```
/// use agenda_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific level for the `agenda` crates.
///
/// `RUST_LOG` still applies to everything else. Calling this twice is harmless:
/// the second registration is ignored.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env();
    let filter = match format!("agenda={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
