//! Shared HTTP client construction policy for resolvers.
//!
//! Centralizes timeout, user-agent, compression and cookie defaults so every
//! resolver request behaves the same way.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::cookie::Jar;

use crate::user_agent;

use super::ResolveError;

/// Default connect timeout for resolver requests.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default per-read timeout. Applies between body chunks, not to the whole
/// transfer, so large files are not cut off.
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Timeouts applied to resolver HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverHttpTimeouts {
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Idle read timeout in seconds.
    pub read_timeout_secs: u64,
}

impl Default for ResolverHttpTimeouts {
    fn default() -> Self {
        Self {
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }
}

/// Builds a resolver HTTP client bound to `cookie_jar`.
///
/// Callers pass a fresh jar per resolution.
///
/// # Errors
///
/// Returns [`ResolveError::Client`] when client construction fails.
pub fn build_resolver_http_client(
    timeouts: ResolverHttpTimeouts,
    cookie_jar: Arc<Jar>,
) -> Result<Client, ResolveError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
        .read_timeout(Duration::from_secs(timeouts.read_timeout_secs))
        .user_agent(user_agent::default_resolver_user_agent())
        .cookie_provider(cookie_jar)
        .gzip(true)
        .build()
        .map_err(|error| ResolveError::client(error.to_string()))
}
