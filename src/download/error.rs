//! Error types for reading a resolved file body.
//!
//! A `ReadError` can only happen after resolution succeeded, so callers map it
//! to a server-side failure rather than a bad request.

use thiserror::Error;

/// Errors that can occur while buffering a resolved file body.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The underlying byte stream failed mid-read.
    #[error("stream error after {bytes_read} bytes: {source}")]
    Stream {
        /// Bytes successfully read before the failure.
        bytes_read: u64,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The body grew past the configured buffering cap.
    #[error("file exceeds the configured limit of {limit} bytes")]
    TooLarge {
        /// The configured cap in bytes.
        limit: u64,
    },
}

impl ReadError {
    /// Creates a stream error.
    #[must_use]
    pub fn stream(bytes_read: u64, source: std::io::Error) -> Self {
        Self::Stream { bytes_read, source }
    }

    /// Creates a too-large error.
    #[must_use]
    pub fn too_large(limit: u64) -> Self {
        Self::TooLarge { limit }
    }
}
