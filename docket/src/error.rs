//! Error taxonomy shared by every transport and view.
//!
//! ERROR HANDLING
//! ==============
//! Three families, all caught locally by the view that triggered them:
//! `ValidationError` (bad form input, raised before any request),
//! `MissingInputError` (pipeline preconditions, raised before any request),
//! and `ApiError` (anything that went wrong on the wire). Each action maps
//! its failure to one fixed user-facing sentence via `user_message`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::case::CaseField;

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields.";
pub const MSG_INVALID_IMAGE_URL: &str = "Please provide a valid image URL.";
pub const MSG_ADD_FAILED: &str = "Failed to add case.";
pub const MSG_ADD_IN_FLIGHT: &str = "A case is already being added.";
pub const MSG_SELECT_FILE: &str = "Please select a file.";
pub const MSG_NEED_SUMMARY_AND_QUERY: &str = "Please process the document and provide your legal query.";
pub const MSG_PROCESS_FAILED: &str = "Failed to process document.";
pub const MSG_QUERY_FAILED: &str = "Failed to generate legal response.";

/// Add-case form input rejected before any request is made.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(CaseField),
    #[error("image URL is not an absolute URL: {0}")]
    InvalidImageUrl(String),
}

impl ValidationError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingField(_) => MSG_FILL_ALL_FIELDS,
            Self::InvalidImageUrl(_) => MSG_INVALID_IMAGE_URL,
        }
    }
}

/// Document pipeline precondition not met; no request is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MissingInputError {
    #[error("no document selected")]
    NoFile,
    #[error("document has not been summarized")]
    NoSummary,
    #[error("legal query is empty")]
    EmptyQuery,
}

impl MissingInputError {
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            Self::NoFile => MSG_SELECT_FILE,
            Self::NoSummary | Self::EmptyQuery => MSG_NEED_SUMMARY_AND_QUERY,
        }
    }
}

/// Any failure of a request against a backend service.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, CORS, ...).
    #[error("request failed: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("service returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not have the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
    /// The transport cannot run in this environment (e.g. during SSR).
    #[error("not available: {0}")]
    Unavailable(&'static str),
}

impl ApiError {
    /// Build a status error, pulling the message out of a `{"error": ...}` body when present.
    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status { status, message: crate::wire::error_message_from_body(body) }
    }
}

/// Why an add-case submission did not go through.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddCaseError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("an add-case request is already in flight")]
    InFlight,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AddCaseError {
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Invalid(e) => e.user_message(),
            Self::InFlight => MSG_ADD_IN_FLIGHT,
            Self::Api(_) => MSG_ADD_FAILED,
        }
    }
}

/// Which pipeline step an error belongs to; selects the fixed failure sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStep {
    Process,
    Query,
}

/// Why a pipeline step did not produce a result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Missing(#[from] MissingInputError),
    #[error("{step:?} request failed: {source}")]
    Api { step: PipelineStep, source: ApiError },
    /// A newer request for the same step was issued; this result was dropped.
    #[error("{0:?} result superseded by a newer request")]
    Superseded(PipelineStep),
}

impl PipelineError {
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Missing(e) => Some(e.user_message()),
            Self::Api { step: PipelineStep::Process, .. } => Some(MSG_PROCESS_FAILED),
            Self::Api { step: PipelineStep::Query, .. } => Some(MSG_QUERY_FAILED),
            Self::Superseded(_) => None,
        }
    }
}
