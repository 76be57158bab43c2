//! Case list view state.
//!
//! DESIGN
//! ======
//! `CaseStore` is the single state struct behind the "Legal Case" tab. All
//! mutation goes through reducer-style methods that either start an action
//! (returning what the caller must send) or apply its completion. The
//! filtered view is always `filter_cases(cases, query)`; it is recomputed on
//! every search keystroke and every applied fetch.
//!
//! CONCURRENCY
//! ===========
//! Fetches are ticketed: the last fetch *issued* wins. Adds are guarded: a
//! second submit while a create is in flight is rejected without a request.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::{debug, warn};

use crate::case::{Case, CaseDraft, CaseField, NewCase, filter_cases};
use crate::error::{AddCaseError, ApiError};
use crate::ticket::{Ticket, TicketBook};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaseStore {
    cases: Vec<Case>,
    filtered: Vec<Case>,
    query: String,
    form: CaseDraft,
    error: Option<String>,
    fetches: TicketBook,
    add_in_flight: bool,
}

impl CaseStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every case from the last applied fetch.
    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Cases matching the current search query.
    #[must_use]
    pub fn filtered(&self) -> &[Case] {
        &self.filtered
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn form(&self) -> &CaseDraft {
        &self.form
    }

    /// Form error line, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.fetches.is_pending()
    }

    #[must_use]
    pub fn is_adding(&self) -> bool {
        self.add_in_flight
    }

    // =========================================================================
    // FETCH
    // =========================================================================

    /// Start a fetch of the full list.
    pub fn begin_fetch(&mut self) -> Ticket {
        self.fetches.issue()
    }

    /// Apply a fetch result. Returns `true` when the list was replaced.
    ///
    /// Failures and stale tickets leave state untouched; failures are logged.
    pub fn finish_fetch(&mut self, ticket: Ticket, result: Result<Vec<Case>, ApiError>) -> bool {
        if !self.fetches.settle(ticket) {
            debug!(generation = ticket.generation(), "cases: dropping stale fetch result");
            return false;
        }
        match result {
            Ok(cases) => {
                self.filtered = filter_cases(&cases, &self.query);
                self.cases = cases;
                true
            }
            Err(e) => {
                warn!(error = %e, "cases: fetch failed");
                false
            }
        }
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    /// Update the search query and recompute the filtered view. No network.
    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.filtered = filter_cases(&self.cases, &self.query);
    }

    // =========================================================================
    // ADD
    // =========================================================================

    pub fn edit(&mut self, field: CaseField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Validate the form and claim the add slot.
    ///
    /// On success the caller must post the returned candidate and report the
    /// outcome through [`CaseStore::finish_add`].
    ///
    /// # Errors
    ///
    /// [`AddCaseError::Invalid`] when validation fails (the form error line is
    /// set), or [`AddCaseError::InFlight`] when a create is already pending.
    pub fn begin_add(&mut self) -> Result<NewCase, AddCaseError> {
        if self.add_in_flight {
            return Err(AddCaseError::InFlight);
        }
        match self.form.validate() {
            Ok(candidate) => {
                self.add_in_flight = true;
                Ok(candidate)
            }
            Err(e) => {
                self.error = Some(e.user_message().to_owned());
                Err(e.into())
            }
        }
    }

    /// Apply the outcome of the create request.
    ///
    /// On success the error line is cleared and `true` is returned: the
    /// caller must refetch and then [`CaseStore::clear_form`]. The new case is
    /// never inserted locally. On failure the form is kept and the error line
    /// says so.
    pub fn finish_add(&mut self, result: Result<(), ApiError>) -> bool {
        self.add_in_flight = false;
        match result {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(e) => {
                warn!(error = %e, "cases: add failed");
                self.error = Some(AddCaseError::Api(e).user_message().to_owned());
                false
            }
        }
    }

    pub fn clear_form(&mut self) {
        self.form = CaseDraft::default();
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Find a case by server id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id.as_deref() == Some(id))
    }
}
