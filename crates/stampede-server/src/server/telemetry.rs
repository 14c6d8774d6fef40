//! Tracing-based console logging.
//!
//! The subscriber is installed unconditionally; the `tracing` feature
//! only controls whether this crate's own call sites are compiled in.
//! With the feature off, events emitted by dependencies still flow
//! through the subscriber.
//!
//! Every process in the cluster installs its own subscriber. Workers
//! inherit the primary's stdout/stderr, so their logs interleave on the
//! supervisor's console.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global console subscriber.
///
/// The filter honors `RUST_LOG` and defaults to `info`.
pub fn init_telemetry() {
    // Standard tracing logs printed to the console via
    // `tracing_subscriber::fmt` - it logs spans/events as human-readable
    // output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
                .with_file(true)
                .pretty(),
        )
        .init();
}
