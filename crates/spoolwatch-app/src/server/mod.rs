// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP print service.
//
// | Path                    | Method | Purpose                          |
// |-------------------------|--------|----------------------------------|
// | /                       | GET    | liveness and version             |
// | /print                  | POST   | submit a document, return at once |
// | /printer/status/{name}  | GET    | one status snapshot              |
// | /files                  | GET    | printable documents              |

pub mod error;
pub mod routes;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use spoolwatch_core::error::Result;

use crate::services::app_services::AppServices;

/// Build the router with middleware and state attached.
pub fn build_app(services: AppServices) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/print", post(routes::print))
        .route("/printer/status/{name}", get(routes::printer_status))
        .route("/files", get(routes::list_files))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(services)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(services: AppServices, listen_addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(addr = %listener.local_addr()?, "printer API listening");

    axum::serve(listener, build_app(services))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down printer API");
        })
        .await?;
    Ok(())
}
