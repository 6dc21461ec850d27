//! Axum router configuration with middleware.
//!
//! Message routes live under `/api/`; `/health` sits at the root.
//! Middleware: CORS, request tracing with a per-request id, and panic
//! recovery that renders the standard error envelope.

use std::any::Any as PanicPayload;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use courier_core::repository::message::MessageRepository;

use crate::http::handlers;
use crate::http::response::ApiError;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router<R: MessageRepository + 'static>(state: AppState<R>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %uuid::Uuid::now_v7(),
        )
    });

    let api_routes = Router::new()
        .route("/messages", post(handlers::message::create_message::<R>))
        .route(
            "/messages/{session_id}",
            get(handlers::message::get_session_messages::<R>),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

/// Turn a handler panic into a 500 with the error envelope.
fn panic_response(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new(
            "INTERNAL_ERROR",
            "Internal server error",
            "An unexpected error occurred. Please try again.",
        )),
    )
        .into_response()
}

/// GET /health - Liveness probe.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
