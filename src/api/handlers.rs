//! Endpoint handlers for the download API.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use tracing::{info, instrument, warn};

use crate::download::{encode_base64, resolve_filename};
use crate::resolver::Resolution;

use super::types::{DownloadRequest, FullDownloadResponse, HealthResponse, InfoResponse};
use super::{ApiError, AppState};

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// `POST /wetransfer`: resolve, buffer the whole file, return it base64-encoded.
#[instrument(skip_all)]
pub(crate) async fn full_download(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FullDownloadResponse>, ApiError> {
    let request = DownloadRequest::from_body(&body)?;

    let Resolution { body, file } = state
        .resolver
        .resolve(&request.source_url, request.password.as_deref())
        .await
        .map_err(ApiError::ResolutionFailure)?;

    let file_name = resolve_filename(&file.filename, &file.final_url);
    let data = body
        .read_to_end(state.max_file_bytes)
        .await
        .map_err(ApiError::ReadFailure)?;

    info!(file_name = %file_name, bytes = data.len(), "serving file");
    Ok(Json(FullDownloadResponse {
        file_name,
        file_binary: encode_base64(&data),
    }))
}

/// `POST /info`: resolve and report metadata; the file body is never read.
#[instrument(skip_all)]
pub(crate) async fn info(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<InfoResponse>), ApiError> {
    let request = DownloadRequest::from_body(&body)?;

    match state
        .resolver
        .resolve(&request.source_url, request.password.as_deref())
        .await
    {
        Ok(Resolution { body, file }) => {
            body.release();
            let filename = resolve_filename(&file.filename, &file.final_url);
            info!(filename = %filename, size = file.size, "link resolved");
            Ok((
                StatusCode::OK,
                Json(InfoResponse::found(filename, file.size, file.direct_url)),
            ))
        }
        Err(error) => {
            warn!(resolver = state.resolver.name(), error = %error, "link resolution failed");
            Ok((
                StatusCode::BAD_REQUEST,
                Json(InfoResponse::failed(error.to_string())),
            ))
        }
    }
}

pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound
}
