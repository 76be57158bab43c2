//! Document pipeline view state: select → summarize → ask → answer.
//!
//! DESIGN
//! ======
//! The pipeline only moves forward. Selecting a file starts over: summary and
//! answer are cleared and any outstanding process/query request is
//! invalidated, so a late summary of the previous document can never attach
//! to the new one. An answer is only ever stored while a summary exists and
//! the query is non-empty.
//!
//! The file handle type `F` is opaque: a browser `File`, bytes read from disk,
//! or a plain string in tests.
//!
//! ERROR HANDLING
//! ==============
//! Two independent error slots: `upload_error` for the process step and
//! `query_error` for the query step. Starting a step clears its own slot.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use tracing::{debug, warn};

use crate::error::{ApiError, MissingInputError, PipelineError, PipelineStep};
use crate::ticket::{Ticket, TicketBook};
use crate::wire::QueryRequest;

#[derive(Clone, Debug)]
pub struct DocumentPipeline<F> {
    file: Option<F>,
    file_name: String,
    summary: Option<String>,
    query: String,
    answer: Option<String>,
    upload_error: Option<String>,
    query_error: Option<String>,
    uploads: TicketBook,
    queries: TicketBook,
}

impl<F> Default for DocumentPipeline<F> {
    fn default() -> Self {
        Self {
            file: None,
            file_name: String::new(),
            summary: None,
            query: String::new(),
            answer: None,
            upload_error: None,
            query_error: None,
            uploads: TicketBook::default(),
            queries: TicketBook::default(),
        }
    }
}

impl<F> DocumentPipeline<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    #[must_use]
    pub fn upload_error(&self) -> Option<&str> {
        self.upload_error.as_deref()
    }

    #[must_use]
    pub fn query_error(&self) -> Option<&str> {
        self.query_error.as_deref()
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.uploads.is_pending()
    }

    #[must_use]
    pub fn is_querying(&self) -> bool {
        self.queries.is_pending()
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Record a newly picked document. Resets summary and answer.
    pub fn select_file(&mut self, file: F, name: impl Into<String>) {
        self.file = Some(file);
        self.file_name = name.into();
        self.summary = None;
        self.answer = None;
        self.uploads.invalidate();
        self.queries.invalidate();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    // =========================================================================
    // PROCESS
    // =========================================================================

    /// Start summarizing the selected document.
    ///
    /// # Errors
    ///
    /// [`MissingInputError::NoFile`] when nothing is selected; the upload
    /// error slot is set and no request must be made.
    pub fn begin_process(&mut self) -> Result<(Ticket, &F), MissingInputError> {
        let Some(file) = self.file.as_ref() else {
            self.upload_error = Some(MissingInputError::NoFile.user_message().to_owned());
            return Err(MissingInputError::NoFile);
        };
        self.upload_error = None;
        Ok((self.uploads.issue(), file))
    }

    /// Apply a summarization result.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Superseded`] for stale tickets (state untouched), or
    /// [`PipelineError::Api`] when the request failed (upload error set,
    /// summary untouched).
    pub fn finish_process(&mut self, ticket: Ticket, result: Result<String, ApiError>) -> Result<(), PipelineError> {
        if !self.uploads.settle(ticket) {
            debug!(generation = ticket.generation(), "pipeline: dropping stale summary");
            return Err(PipelineError::Superseded(PipelineStep::Process));
        }
        match result {
            Ok(summary) => {
                self.summary = Some(summary);
                Ok(())
            }
            Err(source) => {
                warn!(error = %source, "pipeline: document processing failed");
                let err = PipelineError::Api { step: PipelineStep::Process, source };
                self.upload_error = err.user_message().map(str::to_owned);
                Err(err)
            }
        }
    }

    // =========================================================================
    // QUERY
    // =========================================================================

    /// Start generating an answer for the current query and summary.
    ///
    /// # Errors
    ///
    /// [`MissingInputError::NoSummary`] or [`MissingInputError::EmptyQuery`];
    /// the query error slot is set and no request must be made.
    pub fn begin_query(&mut self) -> Result<(Ticket, QueryRequest), MissingInputError> {
        let missing = match self.summary.as_deref() {
            None => Some(MissingInputError::NoSummary),
            Some(_) if self.query.trim().is_empty() => Some(MissingInputError::EmptyQuery),
            Some(_) => None,
        };
        if let Some(missing) = missing {
            self.query_error = Some(missing.user_message().to_owned());
            return Err(missing);
        }
        self.query_error = None;
        let request = QueryRequest {
            legal_query: self.query.clone(),
            document_summary: self.summary.clone().unwrap_or_default(),
        };
        Ok((self.queries.issue(), request))
    }

    /// Apply an answer.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Superseded`] for stale tickets, or
    /// [`PipelineError::Api`] when the request failed (query error set,
    /// answer untouched).
    pub fn finish_query(&mut self, ticket: Ticket, result: Result<String, ApiError>) -> Result<(), PipelineError> {
        if !self.queries.settle(ticket) || self.summary.is_none() || self.query.trim().is_empty() {
            debug!(generation = ticket.generation(), "pipeline: dropping stale answer");
            return Err(PipelineError::Superseded(PipelineStep::Query));
        }
        match result {
            Ok(answer) => {
                self.answer = Some(answer);
                Ok(())
            }
            Err(source) => {
                warn!(error = %source, "pipeline: response generation failed");
                let err = PipelineError::Api { step: PipelineStep::Query, source };
                self.query_error = err.user_message().map(str::to_owned);
                Err(err)
            }
        }
    }
}
