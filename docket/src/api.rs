//! Transport seams for the two backend services.
//!
//! The browser implements these with `gloo-net`, the CLI with `reqwest`, and
//! tests with in-memory fakes. Futures are not required to be `Send` so the
//! same traits work on the single-threaded WASM executor.

use async_trait::async_trait;

use crate::case::{Case, NewCase};
use crate::error::ApiError;
use crate::wire::{AddCaseResponse, QueryRequest};

/// Case service: `GET /cases`, `POST /cases/add`, `POST /cases/search`.
#[async_trait(?Send)]
pub trait CaseApi {
    /// Fetch every case.
    async fn list_cases(&self) -> Result<Vec<Case>, ApiError>;

    /// Create one case from a validated candidate.
    async fn add_case(&self, case: &NewCase) -> Result<AddCaseResponse, ApiError>;

    /// Server-side search. The browser view filters locally instead.
    async fn search_cases(&self, query: &str) -> Result<Vec<Case>, ApiError>;
}

/// Document service: `POST /rag/process`, `POST /rag/query`.
#[async_trait(?Send)]
pub trait RagApi {
    /// Opaque handle to the document being uploaded.
    type Upload;

    /// Upload a document as multipart form data and return its summary.
    async fn process_document(&self, upload: &Self::Upload) -> Result<String, ApiError>;

    /// Ask a legal question against a document summary and return the answer.
    async fn generate_response(&self, request: &QueryRequest) -> Result<String, ApiError>;
}
