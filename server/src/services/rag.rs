//! RAG service: summarize a document, then answer a query against the summary
//! and the most similar stored cases.
//!
//! DESIGN
//! ======
//! Prompt building and output cleaning are pure functions. The async entry
//! points only add the LLM call and the repository read, so handlers stay
//! thin and tests drive this module with a mock `LlmChat`.
//!
//! ERROR HANDLING
//! ==============
//! No configured LLM is [`RagError::Unavailable`]; provider failures keep
//! their [`LlmError`]. Routes turn these into 503 and 502.

use tracing::{info, warn};

use crate::config::RagSettings;
use crate::llm::{LlmChat, LlmError, Message};
use crate::services::cases::{CaseRepository, RepoError};
use crate::services::similar::{ScoredCase, most_similar};

pub const SUMMARY_PREFIX: &str = "📄 ";
pub const ANSWER_PREFIX: &str = "🤖 ";

/// Documents longer than this are cut before prompting.
pub const MAX_DOCUMENT_CHARS: usize = 100_000;

const SYSTEM_PROMPT: &str = "You are LexGenie, a careful legal research assistant. \
Answer in plain prose and bullet points. Do not invent case law.";

#[derive(Debug, thiserror::Error)]
pub enum RagError {
    #[error("LLM not configured")]
    Unavailable,
    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),
    #[error("case lookup failed: {0}")]
    Repo(#[from] RepoError),
}

// =============================================================================
// PROMPTS
// =============================================================================

#[must_use]
pub fn summary_prompt(document: &str) -> String {
    format!(
        "Summarize the following legal document and extract key points.\n\n\
         Document:\n{document}\n\n\
         Provide a concise summary and list each key point on a new line preceded by a bullet (e.g., - )."
    )
}

#[must_use]
pub fn response_prompt(query: &str, summary: &str, similar: &[ScoredCase<'_>]) -> String {
    let past_cases = if similar.is_empty() {
        "- (none on file)".to_owned()
    } else {
        similar
            .iter()
            .map(|s| format!("- {}: {}", s.case.title, s.case.description))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "User Query: {query}\n\n\
         Summarized Document:\n{summary}\n\n\
         Relevant Past Cases:\n{past_cases}\n\n\
         Provide a legal response in 10 detailed points with reasoning. \
         List each point on a separate line preceded by a bullet (e.g., - )."
    )
}

/// Drop markdown emphasis and heading marks, collapse whitespace, trim.
#[must_use]
pub fn clean_text(text: &str) -> String {
    text.split(|c: char| c.is_whitespace())
        .map(|word| word.replace(['#', '*'], ""))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Summarize extracted document text. Returns the prefixed, cleaned summary.
///
/// # Errors
///
/// [`RagError::Unavailable`] without an LLM, [`RagError::Llm`] on provider
/// failure.
pub async fn summarize(llm: Option<&dyn LlmChat>, settings: RagSettings, document: &str) -> Result<String, RagError> {
    let llm = llm.ok_or(RagError::Unavailable)?;
    let body = truncate_chars(document, MAX_DOCUMENT_CHARS);
    if body.len() < document.len() {
        warn!(limit = MAX_DOCUMENT_CHARS, "rag: document truncated before summarizing");
    }

    let response = llm
        .chat(settings.max_tokens, SYSTEM_PROMPT, &[Message::user(summary_prompt(body))])
        .await?;
    info!(
        model = %response.model,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        stop_reason = %response.stop_reason,
        "rag: document summarized"
    );
    Ok(format!("{SUMMARY_PREFIX}{}", clean_text(&response.text)))
}

/// Answer `query` grounded in `summary` and the closest stored cases.
///
/// # Errors
///
/// [`RagError::Unavailable`] without an LLM, [`RagError::Repo`] when the
/// catalog cannot be read, [`RagError::Llm`] on provider failure.
pub async fn answer(
    llm: Option<&dyn LlmChat>,
    cases: &dyn CaseRepository,
    settings: RagSettings,
    query: &str,
    summary: &str,
) -> Result<String, RagError> {
    let llm = llm.ok_or(RagError::Unavailable)?;
    let catalog = cases.list().await?;
    let similar = most_similar(query, &catalog, settings.similar_cases);
    info!(
        matches = similar.len(),
        scores = ?similar.iter().map(|s| s.score).collect::<Vec<_>>(),
        "rag: similar cases retrieved"
    );

    let prompt = response_prompt(query, summary, &similar);
    let response = llm
        .chat(settings.max_tokens, SYSTEM_PROMPT, &[Message::user(prompt)])
        .await?;
    info!(model = %response.model, output_tokens = response.output_tokens, "rag: response generated");
    Ok(format!("{ANSWER_PREFIX}{}", clean_text(&response.text)))
}

#[cfg(test)]
#[path = "rag_test.rs"]
mod tests;
