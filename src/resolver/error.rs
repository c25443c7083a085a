//! Error types for link resolution.
//!
//! The dispatch layer treats these as opaque: it forwards the `Display` text to
//! the caller and never branches on the variant.

use thiserror::Error;

/// Errors that can occur while resolving a shared-file-service link.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The input is not a link this resolver understands.
    #[error("invalid transfer link '{input}': {reason}")]
    InvalidLink {
        /// The link as supplied by the caller.
        input: String,
        /// Why the link was rejected.
        reason: String,
    },

    /// Network-level failure talking to the file service.
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL being requested.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The file service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The file service refused the request and said why (wrong password,
    /// expired transfer, ...). Displayed verbatim.
    #[error("{message}")]
    Rejected {
        /// Message as reported by the service.
        message: String,
    },

    /// The download API answered successfully but without a direct link.
    #[error("no direct link returned for transfer {transfer_id}")]
    MissingDirectLink {
        /// Transfer whose download was requested.
        transfer_id: String,
    },

    /// HTTP client construction failed.
    #[error("HTTP client construction failed: {reason}")]
    Client {
        /// Why construction failed.
        reason: String,
    },
}

impl ResolveError {
    /// Creates an `InvalidLink` error.
    #[must_use]
    pub fn invalid_link(input: &str, reason: &str) -> Self {
        Self::InvalidLink {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `Network` error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an `HttpStatus` error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a `Rejected` error carrying the service's own message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates a `MissingDirectLink` error.
    #[must_use]
    pub fn missing_direct_link(transfer_id: &str) -> Self {
        Self::MissingDirectLink {
            transfer_id: transfer_id.to_string(),
        }
    }

    /// Creates a `Client` error.
    pub fn client(reason: impl Into<String>) -> Self {
        Self::Client {
            reason: reason.into(),
        }
    }
}
