//! Document pipeline endpoints: `/rag/process` and `/rag/query`.

use axum::Json;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docket::wire::{ProcessResponse, QueryRequest, QueryResponse, UPLOAD_FIELD};
use tracing::{info, warn};

use super::cases::MSG_INVALID_DATA;
use super::error_response;
use crate::services::extract::{ExtractError, extract_text};
use crate::services::rag::{self, RagError};
use crate::state::AppState;

pub const MSG_NO_FILE_PART: &str = "No file part in the request";
pub const MSG_NO_SELECTED_FILE: &str = "No selected file";
pub const MSG_UNSUPPORTED_TYPE: &str = "Unsupported document type";
pub const MSG_EXTRACT_FAILED: &str = "Failed to extract text from file";
pub const MSG_TOO_LARGE: &str = "Document too large";
pub const MSG_MALFORMED_UPLOAD: &str = "Malformed upload";
pub const MSG_LLM_UNAVAILABLE: &str = "Language model not configured";
pub const MSG_SUMMARY_FAILED: &str = "Could not generate summary";
pub const MSG_RESPONSE_FAILED: &str = "Could not generate legal response";

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

fn multipart_error_to_response(err: &MultipartError) -> Response {
    let status = err.status();
    warn!(error = %err, %status, "rag: upload read failed");
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        error_response(status, MSG_TOO_LARGE)
    } else {
        error_response(StatusCode::BAD_REQUEST, MSG_MALFORMED_UPLOAD)
    }
}

fn rag_error_to_response(err: &RagError, failure_message: &str) -> Response {
    match err {
        RagError::Unavailable => error_response(StatusCode::SERVICE_UNAVAILABLE, MSG_LLM_UNAVAILABLE),
        RagError::Llm(e) => {
            warn!(error = %e, retryable = e.retryable(), "rag: llm failure");
            error_response(StatusCode::BAD_GATEWAY, failure_message)
        }
        RagError::Repo(e) => {
            warn!(error = %e, "rag: case lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, failure_message)
        }
    }
}

/// Find the `file` part and read it fully. Other parts are skipped.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await?;
        return Ok(Some(Upload { file_name, bytes: bytes.to_vec() }));
    }
    Ok(None)
}

/// `POST /rag/process`
pub async fn process_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let Ok(mut multipart) = multipart else {
        return error_response(StatusCode::BAD_REQUEST, MSG_NO_FILE_PART);
    };
    let upload = match read_upload(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return error_response(StatusCode::BAD_REQUEST, MSG_NO_FILE_PART),
        Err(e) => return multipart_error_to_response(&e),
    };
    if upload.file_name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, MSG_NO_SELECTED_FILE);
    }
    if upload.bytes.len() > state.rag.max_upload_bytes {
        return error_response(StatusCode::PAYLOAD_TOO_LARGE, MSG_TOO_LARGE);
    }

    let text = match extract_text(&upload.file_name, &upload.bytes) {
        Ok(text) => text,
        Err(ExtractError::Unsupported(name)) => {
            info!(file = %name, "rag: unsupported upload");
            return error_response(StatusCode::UNSUPPORTED_MEDIA_TYPE, MSG_UNSUPPORTED_TYPE);
        }
        Err(ExtractError::Empty) => return error_response(StatusCode::BAD_REQUEST, MSG_EXTRACT_FAILED),
    };
    info!(file = %upload.file_name, bytes = upload.bytes.len(), "rag: document received");

    match rag::summarize(state.llm(), state.rag, &text).await {
        Ok(document_summary) => Json(ProcessResponse { document_summary }).into_response(),
        Err(e) => rag_error_to_response(&e, MSG_SUMMARY_FAILED),
    }
}

/// `POST /rag/query`
pub async fn query_response(State(state): State<AppState>, body: Result<Json<QueryRequest>, JsonRejection>) -> Response {
    let Ok(Json(request)) = body else {
        return error_response(StatusCode::BAD_REQUEST, MSG_INVALID_DATA);
    };

    match rag::answer(state.llm(), state.cases.as_ref(), state.rag, &request.legal_query, &request.document_summary)
        .await
    {
        Ok(ai_response) => Json(QueryResponse { ai_response }).into_response(),
        Err(e) => rag_error_to_response(&e, MSG_RESPONSE_FAILED),
    }
}

#[cfg(test)]
#[path = "rag_test.rs"]
mod tests;
