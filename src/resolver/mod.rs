//! Link resolution: turning a shared-file-service link into a readable file.
//!
//! The request dispatcher depends only on the [`Resolver`] trait. A resolver
//! takes the caller's link and optional password and either fails with a
//! [`ResolveError`] or returns a [`Resolution`]: the file's metadata plus a
//! [`FileBody`] that the caller now owns.
//!
//! # Architecture
//!
//! - [`Resolver`] - Async trait implemented by concrete resolvers
//! - [`Resolution`] - Owned body plus [`ResolvedFile`] metadata
//! - [`WeTransferResolver`] - Resolver for `wetransfer.com` and `we.tl` links
//!
//! # Example
//!
//! ```no_run
//! use wedl_core::resolver::{Resolver, ResolverHttpTimeouts, WeTransferResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = WeTransferResolver::new(ResolverHttpTimeouts::default())?;
//! let resolution = resolver.resolve("https://we.tl/t-abc123", None).await?;
//! println!("{} ({} bytes)", resolution.file.filename, resolution.file.size);
//! resolution.body.release();
//! # Ok(())
//! # }
//! ```

mod error;
mod http_client;
mod utils;
mod wetransfer;

pub use error::ResolveError;
pub use http_client::{ResolverHttpTimeouts, build_resolver_http_client};
pub use wetransfer::WeTransferResolver;

use async_trait::async_trait;

use crate::download::FileBody;

/// Metadata the resolver discovered about the target file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFile {
    /// URL of the final request that produced the body, after redirects.
    pub final_url: String,
    /// Filename reported by the service. May be empty.
    pub filename: String,
    /// Size in bytes as reported by the service, 0 when unknown.
    pub size: u64,
    /// Direct download URL for the file bytes.
    pub direct_url: String,
}

/// A successful resolution: metadata plus the not-yet-read body.
#[derive(Debug)]
pub struct Resolution {
    /// Byte stream for the file. Released when read or dropped.
    pub body: FileBody,
    /// Resolved metadata.
    pub file: ResolvedFile,
}

impl Resolution {
    /// Creates a resolution from its parts.
    #[must_use]
    pub fn new(body: FileBody, file: ResolvedFile) -> Self {
        Self { body, file }
    }
}

/// Turns a shared-file-service link into a readable file.
///
/// # Object Safety
///
/// This trait uses `async_trait` so the server can hold an
/// `Arc<dyn Resolver>`; native async trait methods are not object-safe.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Returns the resolver's name, used for logging.
    fn name(&self) -> &str;

    /// Resolves `source_url`, submitting `password` when the link needs one.
    async fn resolve(
        &self,
        source_url: &str,
        password: Option<&str>,
    ) -> Result<Resolution, ResolveError>;
}
