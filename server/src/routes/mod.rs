//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the case and RAG JSON endpoints and stitches them with
//! Leptos SSR rendering under a single Axum router. When no Leptos
//! configuration is available the API router is served on its own.

pub mod cases;
pub mod rag;

use std::path::PathBuf;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use docket::wire::{self, ErrorBody};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// Multipart framing on top of the document bytes.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// JSON error body with the given status.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let origin = match allow_origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(e)) => {
            warn!(error = %e, "CORS_ALLOW_ORIGIN is not a valid header value; allowing any origin");
            AllowOrigin::any()
        }
        None => AllowOrigin::any(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// JSON API routes shared by the SSR app, the CLI and external clients.
pub fn api_routes(state: AppState, allow_origin: Option<&str>) -> Router {
    let upload_limit = state.rag.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route(wire::CASES_PATH, get(cases::list_cases))
        .route(wire::ADD_CASE_PATH, post(cases::add_case))
        .route(wire::SEARCH_CASES_PATH, post(cases::search_cases))
        .route(
            wire::PROCESS_DOCUMENT_PATH,
            post(rag::process_document).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(wire::RAG_QUERY_PATH, post(rag::query_response))
        .route("/healthz", get(healthz))
        .layer(cors_layer(allow_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Leptos SSR frontend merged with the API routes.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn leptos_app(state: AppState, allow_origin: Option<&str>) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // WASM, CSS and JS bundles live under the site root.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state, allow_origin)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
