//! Wire DTOs and endpoint paths for the case and document services.
//!
//! DESIGN
//! ======
//! One canonical contract per capability: cases live under `/cases`, the
//! document pipeline under `/rag/process` + `/rag/query`. Base URLs are never
//! baked in here; callers inject them through [`Endpoints`].

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};

pub const CASES_PATH: &str = "/cases";
pub const ADD_CASE_PATH: &str = "/cases/add";
pub const SEARCH_CASES_PATH: &str = "/cases/search";
pub const PROCESS_DOCUMENT_PATH: &str = "/rag/process";
pub const RAG_QUERY_PATH: &str = "/rag/query";

/// Multipart field name carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

/// Base URLs of the two backend services.
///
/// An empty base means same-origin (relative URLs), which is what the
/// browser app uses when the server hosts both APIs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub cases_base: String,
    pub rag_base: String,
}

impl Endpoints {
    #[must_use]
    pub fn new(cases_base: impl Into<String>, rag_base: impl Into<String>) -> Self {
        Self { cases_base: normalize_base(cases_base.into()), rag_base: normalize_base(rag_base.into()) }
    }

    /// Both services behind one base URL.
    #[must_use]
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self::new(base.clone(), base)
    }

    #[must_use]
    pub fn cases(&self) -> String {
        format!("{}{CASES_PATH}", self.cases_base)
    }

    #[must_use]
    pub fn add_case(&self) -> String {
        format!("{}{ADD_CASE_PATH}", self.cases_base)
    }

    #[must_use]
    pub fn search_cases(&self) -> String {
        format!("{}{SEARCH_CASES_PATH}", self.cases_base)
    }

    #[must_use]
    pub fn process_document(&self) -> String {
        format!("{}{PROCESS_DOCUMENT_PATH}", self.rag_base)
    }

    #[must_use]
    pub fn rag_query(&self) -> String {
        format!("{}{RAG_QUERY_PATH}", self.rag_base)
    }
}

fn normalize_base(base: String) -> String {
    base.trim().trim_end_matches('/').to_owned()
}

/// Body of `POST /cases/search`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Body returned by `POST /cases/add`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCaseResponse {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Body returned by `POST /rag/process`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub document_summary: String,
}

/// Body of `POST /rag/query`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub legal_query: String,
    pub document_summary: String,
}

/// Body returned by `POST /rag/query`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub ai_response: String,
}

/// Error body used by both services: `{"error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Best-effort message extraction from an error response body.
///
/// Uses the `error` field when the body is an [`ErrorBody`], otherwise the
/// trimmed raw text (truncated to keep logs readable).
#[must_use]
pub fn error_message_from_body(body: &str) -> String {
    const MAX_RAW: usize = 200;
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    let raw = body.trim();
    match raw.char_indices().nth(MAX_RAW) {
        Some((cut, _)) => format!("{}...", &raw[..cut]),
        None => raw.to_owned(),
    }
}
