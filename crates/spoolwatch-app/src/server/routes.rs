// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Route handlers for the print service.

use std::path::{Component, Path};

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path as UrlPath, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use spoolwatch_core::error::SpoolwatchError;
use spoolwatch_core::types::{ColorMode, DuplexEdge, PaperSize, PrintOptions};

use super::error::ApiError;
use crate::services::app_services::AppServices;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

// -- Request / response bodies ------------------------------------------------

/// Every field may be missing or `null`; both take the default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PrintRequest {
    /// Document name, relative to the document directory.
    pub file_name: Option<String>,
    pub printer: Option<String>,
    pub settings: Option<PrintSettings>,
}

/// Free-form keywords as sent by clients; unknown values take defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    pub paper_size: Option<String>,
    pub color: Option<String>,
    pub double_sided: Option<bool>,
    pub duplex_mode: Option<String>,
    pub copies: Option<i64>,
}

impl PrintSettings {
    pub fn to_options(&self) -> PrintOptions {
        PrintOptions::new(
            PaperSize::from_keyword(self.paper_size.as_deref().unwrap_or_default()),
            ColorMode::from_keyword(self.color.as_deref().unwrap_or_default()),
            self.double_sided.unwrap_or(false),
            DuplexEdge::from_keyword(self.duplex_mode.as_deref().unwrap_or_default()),
            self.copies.unwrap_or(1),
        )
    }
}

/// Service requests may only name files inside the document directory.
fn within_document_dir(file_name: &Path) -> bool {
    file_name
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub success: bool,
    pub message: String,
    pub job_id: String,
}

// -- Handlers ----------------------------------------------------------------

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Printer API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Submit a document.  Returns as soon as the renderer has handed the job to
/// the spooler.
pub async fn print(
    State(services): State<AppServices>,
    payload: Result<Json<PrintRequest>, JsonRejection>,
) -> ApiResult<PrintResponse> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError(SpoolwatchError::InvalidRequest(format!(
            "invalid request body: {}",
            rejection.body_text()
        )))
    })?;

    let file_name = request.file_name.as_deref().map(str::trim).unwrap_or_default();
    if file_name.is_empty() {
        return Err(SpoolwatchError::InvalidRequest("file_name is required".into()).into());
    }
    let document = Path::new(file_name);
    if !within_document_dir(document) {
        return Err(SpoolwatchError::InvalidRequest(format!(
            "file_name must be inside the document directory: {file_name}"
        ))
        .into());
    }

    let printer = services.printer_or_default(request.printer.as_deref());
    let options = request.settings.unwrap_or_default().to_options();
    let handle = services.print_detached(document, printer, &options).await?;

    Ok(Json(PrintResponse {
        success: true,
        message: "Print job sent successfully".into(),
        job_id: handle.id.to_string(),
    }))
}

pub async fn printer_status(
    State(services): State<AppServices>,
    UrlPath(name): UrlPath<String>,
) -> ApiResult<Value> {
    let snapshot = services.printer_status(&name).await?;
    Ok(Json(json!({ "success": true, "data": snapshot })))
}

pub async fn list_files(State(services): State<AppServices>) -> ApiResult<Value> {
    let files = services.list_documents()?;
    Ok(Json(json!({
        "success": true,
        "count": files.len(),
        "files": files,
    })))
}
