//! Case catalog endpoints.
//!
//! Bodies that fail to parse, miss a field, or fail the shared docket
//! validation all get the same `400 {"error": "Invalid data"}`.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docket::CaseDraft;
use docket::wire::{AddCaseResponse, SearchRequest};
use serde::Deserialize;
use tracing::{info, warn};

use super::error_response;
use crate::services::cases::RepoError;
use crate::state::AppState;

pub const MSG_INVALID_DATA: &str = "Invalid data";
pub const MSG_CASE_ADDED: &str = "Case added successfully";

#[derive(Debug, Deserialize)]
pub struct AddCaseBody {
    pub title: String,
    pub description: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

fn repo_error_to_response(err: &RepoError, action: &str) -> Response {
    warn!(error = %err, action, "cases: repository failure");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, &format!("Failed to {action}"))
}

/// `GET /cases`
pub async fn list_cases(State(state): State<AppState>) -> Response {
    match state.cases.list().await {
        Ok(cases) => Json(cases).into_response(),
        Err(e) => repo_error_to_response(&e, "load cases"),
    }
}

/// `POST /cases/add`
pub async fn add_case(State(state): State<AppState>, body: Result<Json<AddCaseBody>, JsonRejection>) -> Response {
    let Ok(Json(body)) = body else {
        return error_response(StatusCode::BAD_REQUEST, MSG_INVALID_DATA);
    };
    let draft = CaseDraft::new(body.title, body.description, body.image_url);
    let candidate = match draft.validate() {
        Ok(candidate) => candidate,
        Err(e) => {
            info!(reason = %e, "cases: rejected add");
            return error_response(StatusCode::BAD_REQUEST, MSG_INVALID_DATA);
        }
    };

    match state.cases.insert(candidate).await {
        Ok(case) => {
            info!(id = ?case.id, title = %case.title, "cases: added");
            let response = AddCaseResponse { message: MSG_CASE_ADDED.to_owned(), id: case.id };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => repo_error_to_response(&e, "add case"),
    }
}

/// `POST /cases/search`
pub async fn search_cases(State(state): State<AppState>, body: Result<Json<SearchRequest>, JsonRejection>) -> Response {
    let Ok(Json(SearchRequest { query })) = body else {
        return error_response(StatusCode::BAD_REQUEST, MSG_INVALID_DATA);
    };
    match state.cases.search(&query).await {
        Ok(cases) => Json(cases).into_response(),
        Err(e) => repo_error_to_response(&e, "search cases"),
    }
}

#[cfg(test)]
#[path = "cases_test.rs"]
mod tests;
