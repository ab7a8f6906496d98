//! Telemetry helpers for pages embedding `storefront-ui`.
//!
//! Widgets log mount decisions and state transitions through `tracing`.
//! Nothing is installed implicitly: hosts either call one of the helpers below
//! (feature `telemetry`) or wire their own subscriber, e.g. a browser console layer.

/// Filter used when `RUST_LOG` is unset: widget transitions at debug, the rest at info.
pub const DEFAULT_TRACING_DIRECTIVE: &str = "info,storefront_ui=debug";

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_DIRECTIVE`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global subscriber
/// was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_directive(DEFAULT_TRACING_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with an explicit fallback filter directive.
#[must_use]
pub fn init_tracing_with_directive(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
