//! Owned, releasable byte stream for a resolved file.
//!
//! [`FileBody`] is the scoped resource a resolver hands back. Whoever holds it
//! owns the underlying connection: reading consumes it, and dropping it on any
//! other path releases it. There is no way to release it twice.

use std::io;
use std::pin::Pin;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt, TryStreamExt};
use tracing::{debug, instrument, trace};

use super::error::ReadError;

/// Boxed stream of body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, io::Error>> + Send>>;

/// A resolved file's bytes, not yet read.
pub struct FileBody {
    stream: ByteStream,
}

impl FileBody {
    /// Wraps an arbitrary chunk stream.
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, io::Error>> + Send + 'static,
    {
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Wraps an HTTP response body. The connection is held until the body is
    /// read or dropped.
    #[must_use]
    pub fn from_response(response: reqwest::Response) -> Self {
        Self::new(response.bytes_stream().map_err(io::Error::other))
    }

    /// Body backed by an in-memory buffer.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self::new(stream::once(async move { Ok(bytes) }))
    }

    /// Reads the whole body into memory, consuming it.
    ///
    /// With `limit` set, fails as soon as more than `limit` bytes arrive.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::Stream`] when the stream yields an error and
    /// [`ReadError::TooLarge`] when the cap is exceeded.
    #[instrument(level = "debug", skip(self))]
    pub async fn read_to_end(mut self, limit: Option<u64>) -> Result<Vec<u8>, ReadError> {
        let mut buffer = Vec::new();
        while let Some(chunk) = self.stream.next().await {
            let chunk = chunk.map_err(|source| ReadError::stream(buffer.len() as u64, source))?;
            if let Some(limit) = limit
                && (buffer.len() + chunk.len()) as u64 > limit
            {
                return Err(ReadError::too_large(limit));
            }
            buffer.extend_from_slice(&chunk);
        }
        debug!(bytes = buffer.len(), "file body buffered");
        Ok(buffer)
    }

    /// Releases the body without reading it.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for FileBody {
    fn drop(&mut self) {
        trace!("file body released");
    }
}

impl std::fmt::Debug for FileBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBody").finish_non_exhaustive()
    }
}

/// Encodes file contents for the `fileBinary` wire field (standard, padded).
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}
