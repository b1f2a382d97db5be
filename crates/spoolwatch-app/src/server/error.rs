// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Maps domain errors onto HTTP responses with a `{success:false, error}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use spoolwatch_core::error::SpoolwatchError;

#[derive(Debug)]
pub struct ApiError(pub SpoolwatchError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SpoolwatchError::FileNotFound(_) | SpoolwatchError::PrinterNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            SpoolwatchError::PrinterNotReady { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SpoolwatchError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SpoolwatchError::RendererMissing { .. }
            | SpoolwatchError::RenderFailed { .. }
            | SpoolwatchError::Config(_)
            | SpoolwatchError::Io(_)
            | SpoolwatchError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SpoolwatchError> for ApiError {
    fn from(err: SpoolwatchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self.0, "request failed");
        } else {
            tracing::warn!(%status, error = %self.0, "request rejected");
        }

        let body = json!({
            "success": false,
            "error": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
