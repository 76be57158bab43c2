//! HTTP transport for the case and document services.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`; uploads go out as
//! browser `FormData`.
//! Server-side (SSR): every call returns [`ApiError::Unavailable`] since these
//! requests are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures are typed `docket::ApiError`s. The reducers turn them into the
//! fixed user-facing sentences, so nothing here formats UI text.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use docket::wire::{AddCaseResponse, QueryRequest};
use docket::{ApiError, Case, CaseApi, Endpoints, NewCase, RagApi};

#[cfg(not(feature = "hydrate"))]
const BROWSER_ONLY: &str = "browser transport during server render";

/// A file picked in the browser, with its display name captured up front.
#[derive(Clone, Debug)]
pub struct BrowserFile {
    #[cfg(feature = "hydrate")]
    file: web_sys::File,
    name: String,
}

impl BrowserFile {
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn new(file: web_sys::File) -> Self {
        let name = file.name();
        Self { file, name }
    }

    /// A handle with no backing file; only useful off the browser.
    #[cfg(not(feature = "hydrate"))]
    #[must_use]
    pub fn detached(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// `CaseApi` + `RagApi` over `fetch`.
#[derive(Clone, Debug, Default)]
pub struct HttpApi {
    endpoints: Endpoints,
}

impl HttpApi {
    #[must_use]
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn transport_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::Transport(err.to_string())
}

#[cfg(any(test, feature = "hydrate"))]
fn decode_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::Decode(err.to_string())
}

#[cfg(feature = "hydrate")]
fn js_error(value: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Transport(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        log::warn!("api: {} returned {status}", resp.url());
        return Err(ApiError::status(status, &body));
    }
    resp.json::<T>().await.map_err(decode_error)
}

#[cfg(feature = "hydrate")]
async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(url: &str, body: &B) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(transport_error)?
        .send()
        .await
        .map_err(transport_error)?;
    read_json(resp).await
}

#[async_trait(?Send)]
impl CaseApi for HttpApi {
    async fn list_cases(&self) -> Result<Vec<Case>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&self.endpoints.cases())
                .send()
                .await
                .map_err(transport_error)?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable(BROWSER_ONLY))
        }
    }

    async fn add_case(&self, case: &NewCase) -> Result<AddCaseResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_json(&self.endpoints.add_case(), case).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = case;
            Err(ApiError::Unavailable(BROWSER_ONLY))
        }
    }

    async fn search_cases(&self, query: &str) -> Result<Vec<Case>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let body = docket::wire::SearchRequest { query: query.to_owned() };
            post_json(&self.endpoints.search_cases(), &body).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = query;
            Err(ApiError::Unavailable(BROWSER_ONLY))
        }
    }
}

#[async_trait(?Send)]
impl RagApi for HttpApi {
    type Upload = BrowserFile;

    async fn process_document(&self, upload: &BrowserFile) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let form = web_sys::FormData::new().map_err(js_error)?;
            form.append_with_blob_and_filename(docket::wire::UPLOAD_FIELD, &upload.file, &upload.name)
                .map_err(js_error)?;
            let resp = gloo_net::http::Request::post(&self.endpoints.process_document())
                .body(form)
                .map_err(transport_error)?
                .send()
                .await
                .map_err(transport_error)?;
            let body: docket::wire::ProcessResponse = read_json(resp).await?;
            Ok(body.document_summary)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = upload;
            Err(ApiError::Unavailable(BROWSER_ONLY))
        }
    }

    async fn generate_response(&self, request: &QueryRequest) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let body: docket::wire::QueryResponse = post_json(&self.endpoints.rag_query(), request).await?;
            Ok(body.ai_response)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(ApiError::Unavailable(BROWSER_ONLY))
        }
    }
}
