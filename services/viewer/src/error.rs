//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use viewer_common::ViewerError;

/// JSON body returned for failed API requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

/// A [`ViewerError`] rendered as a JSON response with its status code.
#[derive(Debug)]
pub struct ApiError(pub ViewerError);

impl<E: Into<ViewerError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
