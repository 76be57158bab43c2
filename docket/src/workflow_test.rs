use std::sync::Mutex;

use async_trait::async_trait;

use super::*;
use crate::case::{Case, CaseField, NewCase};
use crate::error::{ApiError, MissingInputError, PipelineStep};
use crate::wire::{AddCaseResponse, QueryRequest};

// =========================================================================
// Fakes
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List,
    Add(NewCase),
    Search(String),
    Process(String),
    Query(QueryRequest),
}

#[derive(Default)]
struct FakeBackend {
    calls: Mutex<Vec<Call>>,
    cases: Mutex<Vec<Case>>,
    fail_add: bool,
    fail_list: bool,
    summary: Option<String>,
    answer: Option<String>,
}

impl FakeBackend {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls mutex").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls mutex").push(call);
    }
}

#[async_trait(?Send)]
impl CaseApi for FakeBackend {
    async fn list_cases(&self) -> Result<Vec<Case>, ApiError> {
        self.record(Call::List);
        if self.fail_list {
            return Err(ApiError::Transport("connection refused".into()));
        }
        Ok(self.cases.lock().expect("cases mutex").clone())
    }

    async fn add_case(&self, case: &NewCase) -> Result<AddCaseResponse, ApiError> {
        self.record(Call::Add(case.clone()));
        if self.fail_add {
            return Err(ApiError::status(500, r#"{"error":"insert failed"}"#));
        }
        let mut cases = self.cases.lock().expect("cases mutex");
        let id = format!("id-{}", cases.len() + 1);
        cases.push(case.clone().into_case(Some(id.clone())));
        Ok(AddCaseResponse { message: "Case added successfully".into(), id: Some(id) })
    }

    async fn search_cases(&self, query: &str) -> Result<Vec<Case>, ApiError> {
        self.record(Call::Search(query.to_owned()));
        Ok(Vec::new())
    }
}

#[async_trait(?Send)]
impl RagApi for FakeBackend {
    type Upload = String;

    async fn process_document(&self, upload: &Self::Upload) -> Result<String, ApiError> {
        self.record(Call::Process(upload.clone()));
        self.summary.clone().ok_or_else(|| ApiError::status(502, ""))
    }

    async fn generate_response(&self, request: &QueryRequest) -> Result<String, ApiError> {
        self.record(Call::Query(request.clone()));
        self.answer.clone().ok_or_else(|| ApiError::Transport("timeout".into()))
    }
}

fn fill(store: &mut CaseStore, image_url: &str) {
    store.edit(CaseField::Title, "Smith v. Jones");
    store.edit(CaseField::Description, "contract dispute");
    store.edit(CaseField::ImageUrl, image_url);
}

// =========================================================================
// Cases
// =========================================================================

#[tokio::test]
async fn add_issues_one_create_and_one_refetch() {
    let api = FakeBackend::default();
    let mut store = CaseStore::new();
    fill(&mut store, "https://x/a.png");

    assert!(submit_case(&api, &mut store).await.unwrap());

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(&calls[0], Call::Add(c) if c.title() == "Smith v. Jones"));
    assert_eq!(calls[1], Call::List);
    assert_eq!(store.cases().len(), 1);
    assert_eq!(store.form().title, "", "form cleared after refetch");
    assert!(store.error().is_none());
}

#[tokio::test]
async fn add_with_malformed_url_makes_no_requests() {
    let api = FakeBackend::default();
    let mut store = CaseStore::new();
    fill(&mut store, "not a url");

    let err = submit_case(&api, &mut store).await.unwrap_err();

    assert!(matches!(err, AddCaseError::Invalid(_)));
    assert!(api.calls().is_empty());
    assert_eq!(store.error(), Some("Please provide a valid image URL."));
    assert_eq!(store.form().image_url, "not a url");
}

#[tokio::test]
async fn add_with_empty_description_makes_no_requests() {
    let api = FakeBackend::default();
    let mut store = CaseStore::new();
    fill(&mut store, "https://x/a.png");
    store.edit(CaseField::Description, "");

    assert!(submit_case(&api, &mut store).await.is_err());
    assert!(api.calls().is_empty());
    assert_eq!(store.error(), Some("Please fill in all fields."));
}

#[tokio::test]
async fn failed_create_skips_refetch_and_keeps_form() {
    let api = FakeBackend { fail_add: true, ..FakeBackend::default() };
    let mut store = CaseStore::new();
    fill(&mut store, "https://x/a.png");

    let err = submit_case(&api, &mut store).await.unwrap_err();

    assert!(matches!(err, AddCaseError::Api(ApiError::Status { status: 500, .. })));
    assert_eq!(api.calls().len(), 1);
    assert_eq!(store.error(), Some("Failed to add case."));
    assert_eq!(store.form().title, "Smith v. Jones");
    assert!(!store.is_adding());
}

#[tokio::test]
async fn failed_refetch_after_add_leaves_list_unchanged() {
    let api = FakeBackend { fail_list: true, ..FakeBackend::default() };
    let mut store = CaseStore::new();
    fill(&mut store, "https://x/a.png");

    assert!(!submit_case(&api, &mut store).await.unwrap(), "refetch failure is reported");

    assert!(store.cases().is_empty(), "list only changes through a successful refetch");
    assert_eq!(store.form().title, "");
}

#[tokio::test]
async fn refresh_then_search_is_local() {
    let api = FakeBackend::default();
    api.cases.lock().unwrap().push(Case {
        id: Some("1".into()),
        title: "Smith v. Jones".into(),
        description: "contract dispute".into(),
        image_url: "https://x/a.png".into(),
    });
    let mut store = CaseStore::new();

    assert!(refresh_cases(&api, &mut store).await);
    store.search("contract");
    store.search("zzz");

    assert_eq!(api.calls(), vec![Call::List]);
    assert!(store.filtered().is_empty());
}

#[tokio::test]
async fn refresh_failure_reports_false() {
    let api = FakeBackend { fail_list: true, ..FakeBackend::default() };
    let mut store = CaseStore::new();
    assert!(!refresh_cases(&api, &mut store).await);
    assert!(!store.is_loading());
}

// =========================================================================
// Pipeline
// =========================================================================

#[tokio::test]
async fn process_then_query_scenario() {
    let api = FakeBackend { summary: Some("S".into()), answer: Some("Yes".into()), ..FakeBackend::default() };
    let mut pipeline = DocumentPipeline::new();
    pipeline.select_file("lease text".to_owned(), "lease.txt");

    process_document(&api, &mut pipeline).await.unwrap();
    assert_eq!(pipeline.summary(), Some("S"));

    pipeline.set_query("Is this enforceable?");
    generate_response(&api, &mut pipeline).await.unwrap();
    assert_eq!(pipeline.answer(), Some("Yes"));

    assert_eq!(
        api.calls(),
        vec![
            Call::Process("lease text".into()),
            Call::Query(QueryRequest { legal_query: "Is this enforceable?".into(), document_summary: "S".into() }),
        ]
    );
}

#[tokio::test]
async fn generate_without_summary_never_hits_network() {
    let api = FakeBackend { answer: Some("Yes".into()), ..FakeBackend::default() };
    for query in ["", "Is this enforceable?", "   "] {
        let mut pipeline: DocumentPipeline<String> = DocumentPipeline::new();
        pipeline.set_query(query);
        let err = generate_response(&api, &mut pipeline).await.unwrap_err();
        assert_eq!(err, PipelineError::Missing(MissingInputError::NoSummary));
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn process_without_file_never_hits_network() {
    let api = FakeBackend { summary: Some("S".into()), ..FakeBackend::default() };
    let mut pipeline: DocumentPipeline<String> = DocumentPipeline::new();
    let err = process_document(&api, &mut pipeline).await.unwrap_err();
    assert_eq!(err, PipelineError::Missing(MissingInputError::NoFile));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn process_failure_surfaces_message() {
    let api = FakeBackend::default();
    let mut pipeline = DocumentPipeline::new();
    pipeline.select_file("x".to_owned(), "x.txt");
    let err = process_document(&api, &mut pipeline).await.unwrap_err();
    assert!(matches!(err, PipelineError::Api { step: PipelineStep::Process, .. }));
    assert_eq!(pipeline.upload_error(), Some("Failed to process document."));
    assert!(pipeline.summary().is_none());
}

#[tokio::test]
async fn query_failure_surfaces_message() {
    let api = FakeBackend { summary: Some("S".into()), ..FakeBackend::default() };
    let mut pipeline = DocumentPipeline::new();
    pipeline.select_file("x".to_owned(), "x.txt");
    process_document(&api, &mut pipeline).await.unwrap();
    pipeline.set_query("q");
    assert!(generate_response(&api, &mut pipeline).await.is_err());
    assert_eq!(pipeline.query_error(), Some("Failed to generate legal response."));
    assert!(pipeline.answer().is_none());
}
