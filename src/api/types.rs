//! Wire types for the HTTP API.

use serde::{Deserialize, Serialize};

use super::ApiError;

/// JSON field carrying the link to resolve.
pub const SOURCE_URL_FIELD: &str = "wetransfer_url";

/// Inbound body of `/wetransfer` and `/info`, as decoded.
///
/// Both fields tolerate absence and `null`; constraints are checked by
/// [`DownloadRequest::from_body`] right after decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Shared-file-service link.
    #[serde(rename = "wetransfer_url", default)]
    pub source_url: Option<String>,
    /// Transfer password, if the link is protected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A download request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// Non-empty shared-file-service link.
    pub source_url: String,
    /// Non-empty password, when one was supplied.
    pub password: Option<String>,
}

impl DownloadRequest {
    /// Decodes and validates a request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when `body` is not a JSON object
    /// of the expected shape, and [`ApiError::MissingField`] when the link is
    /// absent or empty.
    pub fn from_body(body: &[u8]) -> Result<ValidatedRequest, ApiError> {
        let request: Self =
            serde_json::from_slice(body).map_err(|source| ApiError::InvalidRequest { source })?;
        request.validate()
    }

    /// Checks required fields. An empty password counts as none.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingField`] when the link is absent or empty.
    pub fn validate(self) -> Result<ValidatedRequest, ApiError> {
        let source_url = self
            .source_url
            .filter(|url| !url.is_empty())
            .ok_or(ApiError::MissingField {
                field: SOURCE_URL_FIELD,
            })?;
        Ok(ValidatedRequest {
            source_url,
            password: self.password.filter(|password| !password.is_empty()),
        })
    }
}

/// Body of a successful `/wetransfer` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullDownloadResponse {
    /// Name the file is served under. Never empty.
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// File contents, standard base64.
    #[serde(rename = "fileBinary")]
    pub file_binary: String,
}

/// Body of every `/info` response that got as far as the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoResponse {
    /// Whether resolution succeeded.
    pub success: bool,
    /// Resolved filename. Never empty when `success` is true.
    pub filename: String,
    /// Size in bytes as reported by the service.
    pub size: u64,
    /// Direct download URL.
    pub dl_url: String,
    /// Resolver error text, present only when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InfoResponse {
    /// Successful lookup.
    #[must_use]
    pub fn found(filename: String, size: u64, dl_url: String) -> Self {
        Self {
            success: true,
            filename,
            size,
            dl_url,
            error: None,
        }
    }

    /// Failed lookup. Metadata fields keep their zero values.
    #[must_use]
    pub fn failed(error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Body of `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Current UTC time, RFC 3339.
    pub timestamp: String,
}
