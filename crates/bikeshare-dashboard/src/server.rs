//! HTTP server exposing the dashboard page
//!
//! Every request to `/` runs the whole pipeline on a blocking worker, so a
//! page always reflects the CSV files as they are on disk.

use crate::pipeline::DashboardPipeline;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use bikeshare_common::DashboardError;
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared application state: immutable, cloned into every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: Arc<DashboardPipeline>,
}

impl AppState {
    pub fn new(pipeline: DashboardPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Failure while producing the page, reported as a 500
#[derive(Debug)]
pub enum PageError {
    Render(DashboardError),
    Worker(tokio::task::JoinError),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match &self {
            PageError::Render(e) => error!(error = %e, "Failed to render dashboard"),
            PageError::Worker(e) => error!(error = %e, "Dashboard render task failed"),
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error: the dashboard could not be rendered",
        )
            .into_response()
    }
}

/// Create the dashboard router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Render the full dashboard page
async fn dashboard_page(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let pipeline = Arc::clone(&state.pipeline);
    let html = tokio::task::spawn_blocking(move || pipeline.render_html())
        .await
        .map_err(PageError::Worker)?
        .map_err(PageError::Render)?;

    Ok(Html(html))
}

/// Liveness check; never touches the data files
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Bind `bind_address` and serve until ctrl-c
pub async fn start_server(state: AppState, bind_address: &str) -> Result<()> {
    info!("Starting dashboard server on {}", bind_address);

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(bind_address).await?;

    info!("Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard server has shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {:?}", e);
        // without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, starting graceful shutdown");
}
