//! Transport-agnostic drivers for the four user actions.
//!
//! These own the state for the whole round trip, which suits the CLI and
//! tests. The browser drives the same reducer methods across reactive
//! signal updates instead of holding `&mut` over an await.

#[cfg(test)]
#[path = "workflow_test.rs"]
mod workflow_test;

use tracing::info;

use crate::api::{CaseApi, RagApi};
use crate::error::{AddCaseError, PipelineError};
use crate::pipeline::DocumentPipeline;
use crate::store::CaseStore;

/// `fetchAll`: reload the case list. Returns `true` when the list was replaced.
pub async fn refresh_cases<A>(api: &A, store: &mut CaseStore) -> bool
where
    A: CaseApi + ?Sized,
{
    let ticket = store.begin_fetch();
    let result = api.list_cases().await;
    store.finish_fetch(ticket, result)
}

/// `add`: validate, create, refetch, then clear the form. Returns `true`
/// when the refetch replaced the list.
///
/// # Errors
///
/// Validation and in-flight rejections return before any request. A failed
/// create returns [`AddCaseError::Api`] without refetching.
pub async fn submit_case<A>(api: &A, store: &mut CaseStore) -> Result<bool, AddCaseError>
where
    A: CaseApi + ?Sized,
{
    let candidate = store.begin_add()?;
    if let Err(e) = api.add_case(&candidate).await {
        store.finish_add(Err(e.clone()));
        return Err(AddCaseError::Api(e));
    }
    store.finish_add(Ok(()));
    info!(title = candidate.title(), "cases: case added");
    let refreshed = refresh_cases(api, store).await;
    store.clear_form();
    Ok(refreshed)
}

/// `processDocument`: upload the selected file and store its summary.
///
/// # Errors
///
/// See [`DocumentPipeline::begin_process`] and [`DocumentPipeline::finish_process`].
pub async fn process_document<A>(api: &A, pipeline: &mut DocumentPipeline<A::Upload>) -> Result<(), PipelineError>
where
    A: RagApi + ?Sized,
{
    let (ticket, upload) = pipeline.begin_process()?;
    let result = api.process_document(upload).await;
    pipeline.finish_process(ticket, result)
}

/// `generateResponse`: ask the current query against the current summary.
///
/// # Errors
///
/// See [`DocumentPipeline::begin_query`] and [`DocumentPipeline::finish_query`].
pub async fn generate_response<A>(api: &A, pipeline: &mut DocumentPipeline<A::Upload>) -> Result<(), PipelineError>
where
    A: RagApi + ?Sized,
{
    let (ticket, request) = pipeline.begin_query()?;
    let result = api.generate_response(&request).await;
    pipeline.finish_query(ticket, result)
}
