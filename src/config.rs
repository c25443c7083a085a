//! Runtime configuration for the API server.
//!
//! [`ServerConfig`] is assembled once at startup (from CLI flags in the
//! binary) and passed down explicitly; nothing here is global.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use crate::api::ApiServer;
use crate::resolver::{ResolveError, ResolverHttpTimeouts, WeTransferResolver};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Public WeTransfer base URL.
pub const DEFAULT_BASE_URL: &str = "https://wetransfer.com";

/// Everything needed to build and bind the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_addr: SocketAddr,
    /// Cap on bytes buffered per `/wetransfer` request. `None` means unbounded.
    pub max_file_bytes: Option<u64>,
    /// Base URL for WeTransfer download API calls.
    pub resolver_base_url: String,
    /// Resolver HTTP timeouts.
    pub resolver_timeouts: ResolverHttpTimeouts,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            max_file_bytes: None,
            resolver_base_url: DEFAULT_BASE_URL.to_string(),
            resolver_timeouts: ResolverHttpTimeouts::default(),
        }
    }
}

impl ServerConfig {
    /// Builds the WeTransfer resolver described by this config.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Client`] when the base URL is invalid.
    pub fn build_resolver(&self) -> Result<WeTransferResolver, ResolveError> {
        WeTransferResolver::with_base_url(&self.resolver_base_url, self.resolver_timeouts)
    }

    /// Builds an [`ApiServer`] backed by the WeTransfer resolver.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Client`] when the base URL is invalid.
    pub fn build_server(&self) -> Result<ApiServer, ResolveError> {
        let resolver = Arc::new(self.build_resolver()?);
        Ok(ApiServer::new(resolver).with_max_file_bytes(self.max_file_bytes))
    }
}
