//! `reqwest` implementation of the docket transport traits.
//!
//! ERROR HANDLING
//! ==============
//! Connection failures become `ApiError::Transport`, non-2xx answers
//! `ApiError::Status` (message taken from the `{"error": ...}` body when
//! present), and unexpected bodies `ApiError::Decode`.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use async_trait::async_trait;
use docket::wire::{AddCaseResponse, ProcessResponse, QueryRequest, QueryResponse, SearchRequest, UPLOAD_FIELD};
use docket::{ApiError, Case, CaseApi, Endpoints, NewCase, RagApi};
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// A document read from disk, ready to upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct HttpApi {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpApi {
    /// # Errors
    ///
    /// Fails only when the TLS backend cannot be initialized.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }

    async fn post_json<B, T>(&self, url: String, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        debug!(%url, "http: POST");
        let resp = self.client.post(url).json(body).send().await.map_err(transport_error)?;
        read_json(resp).await
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn read_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::status(status.as_u16(), &body));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl CaseApi for HttpApi {
    async fn list_cases(&self) -> Result<Vec<Case>, ApiError> {
        let url = self.endpoints.cases();
        debug!(%url, "http: GET");
        let resp = self.client.get(url).send().await.map_err(transport_error)?;
        read_json(resp).await
    }

    async fn add_case(&self, case: &NewCase) -> Result<AddCaseResponse, ApiError> {
        self.post_json(self.endpoints.add_case(), case).await
    }

    async fn search_cases(&self, query: &str) -> Result<Vec<Case>, ApiError> {
        let body = SearchRequest { query: query.to_owned() };
        self.post_json(self.endpoints.search_cases(), &body).await
    }
}

#[async_trait(?Send)]
impl RagApi for HttpApi {
    type Upload = DocumentUpload;

    async fn process_document(&self, upload: &DocumentUpload) -> Result<String, ApiError> {
        let url = self.endpoints.process_document();
        debug!(%url, file = %upload.file_name, bytes = upload.bytes.len(), "http: upload");
        let part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        let form = Form::new().part(UPLOAD_FIELD, part);
        let resp = self.client.post(url).multipart(form).send().await.map_err(transport_error)?;
        let body: ProcessResponse = read_json(resp).await?;
        Ok(body.document_summary)
    }

    async fn generate_response(&self, request: &QueryRequest) -> Result<String, ApiError> {
        let body: QueryResponse = self.post_json(self.endpoints.rag_query(), request).await?;
        Ok(body.ai_response)
    }
}
