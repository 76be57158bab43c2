use std::sync::Mutex;

use async_trait::async_trait;
use docket::error::{MSG_ADD_FAILED, MSG_PROCESS_FAILED};
use docket::wire::AddCaseResponse;
use docket::{Case, CaseField};

use super::*;

// =========================================================================
// Fake backend
// =========================================================================

#[derive(Default)]
struct StubBackend {
    cases: Mutex<Vec<Case>>,
    reject_add: bool,
    summary: Option<String>,
    answer: Option<String>,
}

#[async_trait(?Send)]
impl CaseApi for StubBackend {
    async fn list_cases(&self) -> Result<Vec<Case>, ApiError> {
        Ok(self.cases.lock().unwrap().clone())
    }

    async fn add_case(&self, case: &NewCase) -> Result<AddCaseResponse, ApiError> {
        if self.reject_add {
            return Err(ApiError::status(400, r#"{"error":"Invalid data"}"#));
        }
        self.cases.lock().unwrap().push(case.clone().into_case(Some("new-1".into())));
        Ok(AddCaseResponse { message: "Case added successfully".into(), id: Some("new-1".into()) })
    }

    async fn search_cases(&self, _query: &str) -> Result<Vec<Case>, ApiError> {
        Ok(Vec::new())
    }
}

#[async_trait(?Send)]
impl RagApi for StubBackend {
    type Upload = String;

    async fn process_document(&self, _upload: &String) -> Result<String, ApiError> {
        self.summary.clone().ok_or(ApiError::status(502, ""))
    }

    async fn generate_response(&self, _request: &QueryRequest) -> Result<String, ApiError> {
        self.answer.clone().ok_or(ApiError::status(502, ""))
    }
}

fn case(title: &str) -> Case {
    Case { id: Some(title.to_lowercase()), title: title.into(), description: "d".into(), image_url: "https://img/x.png".into() }
}

fn filled_store() -> RwSignal<CaseStore> {
    let cases = RwSignal::new(CaseStore::new());
    cases.update(|s| {
        s.edit(CaseField::Title, "Roe v. Wade");
        s.edit(CaseField::Description, "Privacy");
        s.edit(CaseField::ImageUrl, "https://img.example/roe.png");
    });
    cases
}

// =========================================================================
// Cases
// =========================================================================

#[tokio::test]
async fn settle_fetch_replaces_list() {
    let api = StubBackend { cases: Mutex::new(vec![case("Alpha"), case("Beta")]), ..StubBackend::default() };
    let cases = RwSignal::new(CaseStore::new());
    let ticket = cases.try_update(CaseStore::begin_fetch).unwrap();

    settle_fetch(&api, cases, ticket).await;

    assert_eq!(cases.with_untracked(|s| s.cases().len()), 2);
    assert!(!cases.with_untracked(CaseStore::is_loading));
}

#[tokio::test]
async fn settle_fetch_drops_superseded_ticket() {
    let api = StubBackend { cases: Mutex::new(vec![case("Alpha")]), ..StubBackend::default() };
    let cases = RwSignal::new(CaseStore::new());
    let stale = cases.try_update(CaseStore::begin_fetch).unwrap();
    let _fresh = cases.try_update(CaseStore::begin_fetch).unwrap();

    settle_fetch(&api, cases, stale).await;

    assert!(cases.with_untracked(|s| s.cases().is_empty()));
}

#[tokio::test]
async fn settle_add_refetches_and_clears_form() {
    let api = StubBackend::default();
    let cases = filled_store();
    let candidate = cases.try_update(CaseStore::begin_add).unwrap().unwrap();

    settle_add(&api, cases, candidate).await;

    cases.with_untracked(|s| {
        assert_eq!(s.cases().len(), 1);
        assert_eq!(s.cases()[0].title, "Roe v. Wade");
        assert_eq!(s.form().get(CaseField::Title), "");
        assert_eq!(s.error(), None);
        assert!(!s.is_adding());
    });
}

#[tokio::test]
async fn settle_add_failure_keeps_form() {
    let api = StubBackend { reject_add: true, ..StubBackend::default() };
    let cases = filled_store();
    let candidate = cases.try_update(CaseStore::begin_add).unwrap().unwrap();

    settle_add(&api, cases, candidate).await;

    cases.with_untracked(|s| {
        assert!(s.cases().is_empty());
        assert_eq!(s.form().get(CaseField::Title), "Roe v. Wade");
        assert_eq!(s.error(), Some(MSG_ADD_FAILED));
    });
}

// =========================================================================
// Document pipeline
// =========================================================================

fn pipeline_with_file() -> RwSignal<DocumentPipeline<String>> {
    let pipeline = RwSignal::new(DocumentPipeline::<String>::new());
    pipeline.update(|p| p.select_file("lease body".to_owned(), "lease.txt"));
    pipeline
}

#[tokio::test]
async fn settle_process_stores_summary() {
    let api = StubBackend { summary: Some("📄 S".into()), ..StubBackend::default() };
    let pipeline = pipeline_with_file();
    let (ticket, upload) = pipeline.try_update(|p| p.begin_process().map(|(t, f)| (t, f.clone()))).unwrap().unwrap();

    settle_process(&api, pipeline, ticket, upload).await;

    assert_eq!(pipeline.with_untracked(|p| p.summary().map(str::to_owned)), Some("📄 S".to_owned()));
}

#[tokio::test]
async fn settle_process_failure_sets_upload_error() {
    let api = StubBackend::default();
    let pipeline = pipeline_with_file();
    let (ticket, upload) = pipeline.try_update(|p| p.begin_process().map(|(t, f)| (t, f.clone()))).unwrap().unwrap();

    settle_process(&api, pipeline, ticket, upload).await;

    pipeline.with_untracked(|p| {
        assert_eq!(p.summary(), None);
        assert_eq!(p.upload_error(), Some(MSG_PROCESS_FAILED));
    });
}

#[tokio::test]
async fn reselecting_file_discards_pending_summary() {
    let api = StubBackend { summary: Some("📄 old".into()), ..StubBackend::default() };
    let pipeline = pipeline_with_file();
    let (ticket, upload) = pipeline.try_update(|p| p.begin_process().map(|(t, f)| (t, f.clone()))).unwrap().unwrap();
    pipeline.update(|p| p.select_file("other".to_owned(), "other.txt"));

    settle_process(&api, pipeline, ticket, upload).await;

    assert_eq!(pipeline.with_untracked(|p| p.summary().map(str::to_owned)), None);
}

#[tokio::test]
async fn settle_query_stores_answer() {
    let api = StubBackend { summary: Some("📄 S".into()), answer: Some("🤖 A".into()), ..StubBackend::default() };
    let pipeline = pipeline_with_file();
    let (ticket, upload) = pipeline.try_update(|p| p.begin_process().map(|(t, f)| (t, f.clone()))).unwrap().unwrap();
    settle_process(&api, pipeline, ticket, upload).await;
    pipeline.update(|p| p.set_query("Is it valid?"));

    let (ticket, request) = pipeline.try_update(DocumentPipeline::begin_query).unwrap().unwrap();
    assert_eq!(request.legal_query, "Is it valid?");
    settle_query(&api, pipeline, ticket, request).await;

    assert_eq!(pipeline.with_untracked(|p| p.answer().map(str::to_owned)), Some("🤖 A".to_owned()));
}
