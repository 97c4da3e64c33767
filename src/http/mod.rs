//! HTTP transport — maps the JSON API onto the submission service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /api/svg` — body `{ "content": "<svg>...</svg>" }`. `201` with the stored record,
//!   `400` on a shape or markup failure, `500` if the store fails.
//! - `GET /api/svg/current` — `200` with the newest record, `404` when nothing was submitted.
//! - `GET /api/svg/current/sanitized` — the newest record's sanitized markup as `image/svg+xml`,
//!   with the record id in the `x-svg-id` header.
//! - `GET /api/svg/all` — `200` with every record, newest first.
//! - `GET /health` — `{ "ok": true, "svgs": <count> }`.
//! - `GET /` — display page that polls for the current SVG.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use svg_relay::{http, InMemoryStore, SvgSubmissionService};
//!
//! let service = Arc::new(SvgSubmissionService::new(InMemoryStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "127.0.0.1:5000").await?;
//! ```

mod envelope;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info, warn};

pub use envelope::ApiResponse;

use crate::service::{SubmissionError, SubmitSvgRequest, SvgSubmissionService};
use crate::store::SvgStore;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Response header naming the record a sanitized body was produced from.
pub const SVG_ID_HEADER: &str = "x-svg-id";

type SharedService<S> = Arc<SvgSubmissionService<S>>;

/// Build an axum `Router` serving the API and the display page.
pub fn router<S: SvgStore + 'static>(service: SharedService<S>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler::<S>))
        .route("/api/svg", post(submit_handler::<S>))
        .route("/api/svg/current", get(current_handler::<S>))
        .route("/api/svg/current/sanitized", get(sanitized_handler::<S>))
        .route("/api/svg/all", get(all_handler::<S>))
        .with_state(service)
}

/// Serve the router at `addr` (e.g. `"127.0.0.1:5000"`) until Ctrl+C.
pub async fn serve<S: SvgStore + 'static>(
    service: SharedService<S>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

/// Turn a service error into the `{ success: false, message }` envelope.
///
/// Storage failures are logged and answered with `fallback` so internal
/// details never reach the client.
fn error_response(err: SubmissionError, fallback: &str) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match &err {
        SubmissionError::Storage(e) => {
            error!(error = %e, "{}", fallback);
            fallback.to_string()
        }
        _ => err.to_string(),
    };
    ApiResponse::error(message).with_status(status)
}

/// `GET /` — the display client.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /health` — returns `{ "ok": true, "svgs": <count> }`.
async fn health_handler<S: SvgStore + 'static>(
    State(service): State<SharedService<S>>,
) -> Response {
    match service.store().len() {
        Ok(count) => Json(json!({ "ok": true, "svgs": count })).into_response(),
        Err(e) => {
            error!(error = %e, "health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false })),
            )
                .into_response()
        }
    }
}

/// `POST /api/svg` — validate and store a submission.
async fn submit_handler<S: SvgStore + 'static>(
    State(service): State<SharedService<S>>,
    body: Result<Json<SubmitSvgRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            let message = rejection.body_text();
            warn!(error = %message, "rejected submission: unreadable body");
            return ApiResponse::error(message).with_status(StatusCode::BAD_REQUEST);
        }
    };

    match service.submit_request(&request) {
        Ok(record) => ApiResponse::ok(record).with_status(StatusCode::CREATED),
        Err(e) => error_response(e, "Internal server error occurred while processing the SVG"),
    }
}

/// `GET /api/svg/current` — the newest record.
async fn current_handler<S: SvgStore + 'static>(
    State(service): State<SharedService<S>>,
) -> Response {
    match service.current() {
        Ok(record) => ApiResponse::ok(record).with_status(StatusCode::OK),
        Err(e) => error_response(e, "Internal server error occurred while fetching the SVG"),
    }
}

/// `GET /api/svg/current/sanitized` — the newest record, sanitized, as SVG.
async fn sanitized_handler<S: SvgStore + 'static>(
    State(service): State<SharedService<S>>,
) -> Response {
    match service.current_sanitized() {
        Ok(svg) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "image/svg+xml".to_string()),
                (HeaderName::from_static(SVG_ID_HEADER), svg.id.to_string()),
            ],
            svg.markup,
        )
            .into_response(),
        Err(e) => error_response(e, "Internal server error occurred while fetching the SVG"),
    }
}

/// `GET /api/svg/all` — every record, newest first.
async fn all_handler<S: SvgStore + 'static>(
    State(service): State<SharedService<S>>,
) -> Response {
    match service.all() {
        Ok(records) => ApiResponse::ok(records).with_status(StatusCode::OK),
        Err(e) => error_response(e, "Internal server error occurred while fetching SVGs"),
    }
}
