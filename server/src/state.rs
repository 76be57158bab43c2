//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the case repository, the optional LLM client and the RAG knobs.
//! Every field is cheap to clone.

use std::sync::Arc;

use crate::config::RagSettings;
use crate::llm::LlmChat;
use crate::services::cases::CaseRepository;

#[derive(Clone)]
pub struct AppState {
    pub cases: Arc<dyn CaseRepository>,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub rag: RagSettings,
}

impl AppState {
    #[must_use]
    pub fn new(cases: Arc<dyn CaseRepository>, llm: Option<Arc<dyn LlmChat>>, rag: RagSettings) -> Self {
        Self { cases, llm, rag }
    }

    /// Borrow the LLM as a trait object, if configured.
    #[must_use]
    pub fn llm(&self) -> Option<&dyn LlmChat> {
        self.llm.as_deref()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;
