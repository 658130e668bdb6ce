//! Observability utilities for generated CLIs.
//!
//! The library only emits `tracing` events. Binaries call [`init_tracing`]
//! once to send them to stderr, so they never mix with command output on
//! stdout.
//!
//! # Example
//!
//! ```no_run
//! use clientcli::observability::init_tracing;
//!
//! init_tracing(Some("clientcli=debug")).expect("valid log filter");
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when neither the caller nor `RUST_LOG` supplies one
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter: an explicit directive string wins, then `RUST_LOG`,
/// then [`DEFAULT_FILTER`]
///
/// # Errors
/// Returns an error if the explicit directive string does not parse
pub fn env_filter(filter: Option<&str>) -> Result<EnvFilter> {
    if let Some(filter) = filter {
        return EnvFilter::try_new(filter)
            .with_context(|| format!("Invalid log filter '{}'", filter));
    }
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
}

/// Install a stderr `fmt` subscriber
///
/// Returns `Ok(false)` when a global subscriber was already set.
///
/// # Errors
/// Returns an error if `filter` is not a valid directive string
pub fn init_tracing(filter: Option<&str>) -> Result<bool> {
    let filter = env_filter(filter)?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter_wins() {
        let filter = env_filter(Some("clientcli=trace")).unwrap();
        assert_eq!(filter.to_string(), "clientcli=trace");
    }

    #[test]
    fn test_invalid_filter_is_reported() {
        let err = env_filter(Some("clientcli=loud")).err().unwrap();
        assert!(err.to_string().contains("Invalid log filter 'clientcli=loud'"));
        assert!(init_tracing(Some("clientcli=loud")).is_err());
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(Some("warn")).unwrap();
        assert!(!init_tracing(Some("warn")).unwrap());
    }
}
