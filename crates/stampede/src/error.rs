use std::path::PathBuf;

/// Convenient alias for payload results.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for payload generation.
///
/// Generating the random buffer and hashing it are infallible; the only
/// fallible step is writing the spill file, and that failure is fatal to
/// the request being served.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Writing the spill file for a freshly generated payload failed.
    #[error("failed to spill payload to {}: {source}", .path.display())]
    Spill {
        /// Destination the write was attempted against.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
