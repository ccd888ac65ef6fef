#![forbid(unsafe_code)]

//! Structured logging support.
//!
//! With the `tracing` feature the usual macros are re-exported at the crate
//! root. The `tracing-json` feature adds a ready-made JSON subscriber for
//! production hosts; its filter defaults to the `VEIL_LOG` environment
//! variable and falls back to `info`.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable read by [`json_subscriber`] when no filter is given.
pub const LOG_ENV: &str = "VEIL_LOG";

/// Build a JSON-formatting subscriber.
///
/// `filter` takes `EnvFilter` directives (e.g. `"veil_widgets=debug"`);
/// `None` reads [`LOG_ENV`].
#[cfg(feature = "tracing-json")]
pub fn json_subscriber(filter: Option<&str>) -> impl tracing::Subscriber + Send + Sync {
    use tracing_subscriber::EnvFilter;

    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .finish()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    use super::*;

    #[test]
    fn json_subscriber_accepts_directives() {
        let subscriber = json_subscriber(Some("veil_core=debug"));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(message = "logging.smoke");
        });
    }
}
