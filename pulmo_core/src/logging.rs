//! Logging infrastructure for hosts embedding pulmo_core.
//!
//! Registry, configuration and binding code emit `tracing` events under the
//! `pulmo_core` target; segment mutators never log. Hosts that do not install
//! their own subscriber can use these helpers.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Target every event in this crate is emitted under
pub const TARGET: &str = "pulmo_core";

/// Initialize logging with the default `info` level
///
/// Can be overridden with the RUST_LOG env var.
pub fn init() -> bool {
    init_with_level("info")
}

/// Initialize logging for this crate's target at `level`
///
/// # Arguments
/// * `level` - Level for `pulmo_core` events (trace, debug, info, warn, error)
///
/// RUST_LOG still takes precedence when set. Returns `false` when a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_with_level(level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .try_init()
        .is_ok()
}

/// Filter directive limiting `level` to this crate, leaving host targets at `warn`
fn directive(level: &str) -> String {
    format!("warn,{}={}", TARGET, level)
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new(directive("debug")))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_scopes_level_to_crate() {
        assert_eq!(directive("debug"), "warn,pulmo_core=debug");
        assert!(directive("trace").parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn test_repeat_init_is_harmless() {
        init_with_level("warn");
        // Whichever call ran first in this process owns the global subscriber
        assert!(!init_with_level("debug"));
        assert!(!init());
        tracing::debug!(target: TARGET, "still logging after repeated init");
    }
}
