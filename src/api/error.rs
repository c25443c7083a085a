//! Errors surfaced by the request dispatcher and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::download::ReadError;
use crate::resolver::ResolveError;

/// Every way a dispatcher request can fail.
///
/// All variants render as `text/plain`. The `/info` endpoint renders
/// resolver failures as JSON itself and never builds `ResolutionFailure`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Wrong HTTP verb for the route.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Body did not decode as a download request.
    #[error("Invalid JSON")]
    InvalidRequest {
        /// Decoder error, kept for logging only.
        #[source]
        source: serde_json::Error,
    },

    /// A required field was absent or empty.
    #[error("{field} is required")]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },

    /// The resolver could not resolve the link.
    #[error("Failed to get download response: {0}")]
    ResolutionFailure(#[source] ResolveError),

    /// Resolution succeeded but reading the file body failed.
    #[error("Failed to read file: {0}")]
    ReadFailure(#[source] ReadError),

    /// No route for the path.
    #[error("404 page not found")]
    NotFound,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidRequest { .. }
            | Self::MissingField { .. }
            | Self::ResolutionFailure(_) => StatusCode::BAD_REQUEST,
            Self::ReadFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::MissingField { field: "wetransfer_url" }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ResolutionFailure(ResolveError::rejected("nope")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ReadFailure(ReadError::too_large(1)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_request_message_hides_decoder_detail() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ApiError::InvalidRequest { source }.to_string(), "Invalid JSON");
    }

    #[test]
    fn test_messages_carry_detail() {
        assert_eq!(
            ApiError::MissingField { field: "wetransfer_url" }.to_string(),
            "wetransfer_url is required"
        );
        assert_eq!(
            ApiError::ResolutionFailure(ResolveError::rejected("link expired")).to_string(),
            "Failed to get download response: link expired"
        );
        assert!(
            ApiError::ReadFailure(ReadError::too_large(5))
                .to_string()
                .starts_with("Failed to read file: ")
        );
    }

    #[test]
    fn test_into_response_is_plain_text() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/plain"), "got {content_type}");
    }
}
