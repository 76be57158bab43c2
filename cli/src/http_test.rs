use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use super::*;

// =========================================================================
// Stub backend on an ephemeral port
// =========================================================================

async fn stub_cases() -> Json<Value> {
    Json(json!([
        { "_id": "c1", "title": "Smith v. Jones", "description": "Lease dispute", "imageUrl": "https://img/1.png" },
        { "title": "Unkeyed", "description": "No id", "imageUrl": "https://img/2.png" }
    ]))
}

async fn stub_add(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["imageUrl"].as_str().is_some_and(|u| u.starts_with("https://")) {
        let echoed = body["title"].clone();
        (StatusCode::CREATED, Json(json!({ "message": "Case added successfully", "_id": echoed })))
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid data" })))
    }
}

async fn stub_search(Json(body): Json<Value>) -> Json<Value> {
    let query = body["query"].as_str().unwrap_or_default().to_owned();
    Json(json!([{ "title": query, "description": "hit", "imageUrl": "https://img/3.png" }]))
}

async fn stub_process(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_owned();
            let text = field.text().await.unwrap_or_default();
            return (StatusCode::OK, Json(json!({ "document_summary": format!("📄 {name}: {text}") })));
        }
    }
    (StatusCode::BAD_REQUEST, Json(json!({ "error": "No file part in the request" })))
}

async fn stub_query(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "ai_response": format!("🤖 {} | {}", body["legal_query"], body["document_summary"]) }))
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/cases", get(stub_cases))
        .route("/cases/add", post(stub_add))
        .route("/cases/search", post(stub_search))
        .route("/rag/process", post(stub_process))
        .route("/rag/query", post(stub_query))
        .route("/plain/cases", get(|| async { "not json" }))
        .route("/down/cases", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route("/down/cases/add", post(stub_add));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
}

fn api_for(base: &str) -> HttpApi {
    HttpApi::new(Endpoints::single(base), Duration::from_secs(5)).unwrap()
}

// =========================================================================
// Cases
// =========================================================================

#[tokio::test]
async fn list_cases_decodes_records() {
    let api = api_for(&spawn_stub().await);
    let cases = api.list_cases().await.unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].id.as_deref(), Some("c1"));
    assert_eq!(cases[1].id, None);
    assert_eq!(cases[1].image_url, "https://img/2.png");
}

#[tokio::test]
async fn add_case_posts_camel_case_body() {
    let api = api_for(&spawn_stub().await);
    let candidate = NewCase::new("Roe v. Wade", "Privacy", "https://img/roe.png").unwrap();
    let resp = api.add_case(&candidate).await.unwrap();
    assert_eq!(resp.message, "Case added successfully");
    assert_eq!(resp.id.as_deref(), Some("Roe v. Wade"));
}

#[tokio::test]
async fn add_case_rejection_carries_server_message() {
    let api = api_for(&spawn_stub().await);
    let candidate = NewCase::new("T", "D", "ftp://img/x.png").unwrap();
    let err = api.add_case(&candidate).await.unwrap_err();
    assert_eq!(err, ApiError::Status { status: 400, message: "Invalid data".into() });
}

fn add_command() -> crate::CasesSubcommand {
    crate::CasesSubcommand::Add {
        title: "Roe v. Wade".into(),
        description: "Privacy".into(),
        image_url: "https://img/roe.png".into(),
    }
}

#[tokio::test]
async fn add_command_reports_count_after_reload() {
    let api = api_for(&spawn_stub().await);
    let out = crate::run_cases(&api, add_command(), false).await.unwrap();
    assert_eq!(out, "Case added successfully. 2 case(s) on file.");
}

#[tokio::test]
async fn add_command_without_reload_omits_count() {
    let base = spawn_stub().await;
    let api = HttpApi::new(Endpoints::new(format!("{base}/down"), base.clone()), Duration::from_secs(5)).unwrap();
    let out = crate::run_cases(&api, add_command(), false).await.unwrap();
    assert_eq!(out, "Case added successfully. The case list could not be reloaded.");

    let out = crate::run_cases(&api, add_command(), true).await.unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert!(json["count"].is_null());
}

#[tokio::test]
async fn search_cases_posts_query() {
    let api = api_for(&spawn_stub().await);
    let hits = api.search_cases("tenant").await.unwrap();
    assert_eq!(hits[0].title, "tenant");
}

// =========================================================================
// Documents
// =========================================================================

#[tokio::test]
async fn process_document_uploads_file_field() {
    let api = api_for(&spawn_stub().await);
    let upload = DocumentUpload { file_name: "lease.txt".into(), bytes: b"Rent is due monthly.".to_vec() };
    let summary = api.process_document(&upload).await.unwrap();
    assert_eq!(summary, "📄 lease.txt: Rent is due monthly.");
}

#[tokio::test]
async fn generate_response_posts_snake_case_fields() {
    let api = api_for(&spawn_stub().await);
    let request = QueryRequest { legal_query: "Valid?".into(), document_summary: "📄 S".into() };
    let answer = api.generate_response(&request).await.unwrap();
    assert_eq!(answer, r#"🤖 "Valid?" | "📄 S""#);
}

// =========================================================================
// Failures
// =========================================================================

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = api_for(&format!("http://{addr}"));
    assert!(matches!(api.list_cases().await, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let base = spawn_stub().await;
    let api = HttpApi::new(Endpoints::new(format!("{base}/plain"), base.clone()), Duration::from_secs(5)).unwrap();
    assert!(matches!(api.list_cases().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn error_status_without_json_body() {
    let base = spawn_stub().await;
    let api = HttpApi::new(Endpoints::new(format!("{base}/down"), base.clone()), Duration::from_secs(5)).unwrap();
    let err = api.list_cases().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 503, .. }));
}
