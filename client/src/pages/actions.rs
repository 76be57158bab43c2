//! Signal-driven versions of the docket workflows.
//!
//! DESIGN
//! ======
//! `docket::workflow` holds `&mut` state across the await, which a reactive
//! signal cannot lend out. Here each action is split in two: the `begin_*`
//! reducer step runs synchronously inside a signal update, the request runs
//! on the local executor, and the `settle_*` step applies the result in a
//! second update. Tickets issued by the reducers drop late results.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

#[cfg(any(test, feature = "hydrate"))]
use docket::wire::QueryRequest;
#[cfg(any(test, feature = "hydrate"))]
use docket::{ApiError, CaseApi, NewCase, RagApi, Ticket};
use docket::{CaseStore, DocumentPipeline};
use leptos::prelude::*;
#[cfg(any(test, feature = "hydrate"))]
use leptos::reactive::owner::Storage;

use crate::net::api::{BrowserFile, HttpApi};

/// Browser `File` handles are not `Send`, so the hydrated app keeps the
/// pipeline in thread-local storage. Server renders only hold file names.
#[cfg(feature = "hydrate")]
pub type PipelineStorage = LocalStorage;
#[cfg(not(feature = "hydrate"))]
pub type PipelineStorage = SyncStorage;

pub type PipelineSignal = RwSignal<DocumentPipeline<BrowserFile>, PipelineStorage>;

// =============================================================================
// SETTLE STEPS
// =============================================================================

#[cfg(any(test, feature = "hydrate"))]
pub(crate) async fn settle_fetch<A>(api: &A, cases: RwSignal<CaseStore>, ticket: Ticket)
where
    A: CaseApi + ?Sized,
{
    let result = api.list_cases().await;
    cases.update(|s| {
        s.finish_fetch(ticket, result);
    });
}

#[cfg(any(test, feature = "hydrate"))]
/// Post the candidate, then refetch and clear the form when it was accepted.
pub(crate) async fn settle_add<A>(api: &A, cases: RwSignal<CaseStore>, candidate: NewCase)
where
    A: CaseApi + ?Sized,
{
    let result: Result<(), ApiError> = api.add_case(&candidate).await.map(|_| ());
    let accepted = cases.try_update(|s| s.finish_add(result)).unwrap_or(false);
    if !accepted {
        return;
    }
    if let Some(ticket) = cases.try_update(CaseStore::begin_fetch) {
        settle_fetch(api, cases, ticket).await;
    }
    cases.update(CaseStore::clear_form);
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) async fn settle_process<A, S>(api: &A, pipeline: RwSignal<DocumentPipeline<A::Upload>, S>, ticket: Ticket, upload: A::Upload)
where
    A: RagApi + ?Sized,
    A::Upload: 'static,
    S: Storage<ArcRwSignal<DocumentPipeline<A::Upload>>>,
{
    let result = api.process_document(&upload).await;
    pipeline.update(|p| {
        let _ = p.finish_process(ticket, result);
    });
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) async fn settle_query<A, S>(api: &A, pipeline: RwSignal<DocumentPipeline<A::Upload>, S>, ticket: Ticket, request: QueryRequest)
where
    A: RagApi + ?Sized,
    A::Upload: 'static,
    S: Storage<ArcRwSignal<DocumentPipeline<A::Upload>>>,
{
    let result = api.generate_response(&request).await;
    pipeline.update(|p| {
        let _ = p.finish_query(ticket, result);
    });
}

// =============================================================================
// BEGIN + SPAWN
// =============================================================================

/// `fetchAll`: reload the case list in the background.
pub fn refresh_cases(api: &HttpApi, cases: RwSignal<CaseStore>) {
    let Some(ticket) = cases.try_update(CaseStore::begin_fetch) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    {
        let api = api.clone();
        leptos::task::spawn_local(async move { settle_fetch(&api, cases, ticket).await });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (api, ticket);
}

/// Validate the form and, when it passes, create the case in the background.
pub fn submit_case(api: &HttpApi, cases: RwSignal<CaseStore>) {
    let Some(Ok(candidate)) = cases.try_update(CaseStore::begin_add) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    {
        let api = api.clone();
        leptos::task::spawn_local(async move { settle_add(&api, cases, candidate).await });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (api, candidate);
}

/// Upload the selected document for summarizing.
pub fn process_document(api: &HttpApi, pipeline: PipelineSignal) {
    let started = pipeline
        .try_update(|p| p.begin_process().map(|(ticket, file)| (ticket, file.clone())).ok())
        .flatten();
    let Some((ticket, upload)) = started else {
        return;
    };
    #[cfg(feature = "hydrate")]
    {
        let api = api.clone();
        leptos::task::spawn_local(async move { settle_process(&api, pipeline, ticket, upload).await });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (api, ticket, upload);
}

/// Ask the current query against the current summary.
pub fn generate_response(api: &HttpApi, pipeline: PipelineSignal) {
    let Some(Ok((ticket, request))) = pipeline.try_update(DocumentPipeline::begin_query) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    {
        let api = api.clone();
        leptos::task::spawn_local(async move { settle_query(&api, pipeline, ticket, request).await });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (api, ticket, request);
}
