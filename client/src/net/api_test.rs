use super::*;

#[test]
fn transport_error_keeps_message() {
    assert_eq!(transport_error("connection refused"), ApiError::Transport("connection refused".to_owned()));
}

#[test]
fn decode_error_keeps_message() {
    assert_eq!(decode_error("expected value"), ApiError::Decode("expected value".to_owned()));
}

#[test]
fn default_api_is_same_origin() {
    let api = HttpApi::default();
    assert_eq!(api.endpoints().cases(), "/cases");
    assert_eq!(api.endpoints().process_document(), "/rag/process");
}

#[test]
fn api_uses_configured_endpoints() {
    let api = HttpApi::new(Endpoints::new("http://cases.local/", "http://rag.local"));
    assert_eq!(api.endpoints().add_case(), "http://cases.local/cases/add");
    assert_eq!(api.endpoints().rag_query(), "http://rag.local/rag/query");
}

#[cfg(not(feature = "hydrate"))]
#[tokio::test]
async fn server_render_calls_are_unavailable() {
    let api = HttpApi::default();
    assert!(matches!(api.list_cases().await, Err(ApiError::Unavailable(_))));
    assert!(matches!(api.search_cases("lease").await, Err(ApiError::Unavailable(_))));

    let file = BrowserFile::detached("lease.txt");
    assert_eq!(file.name(), "lease.txt");
    assert!(matches!(api.process_document(&file).await, Err(ApiError::Unavailable(_))));
}

#[cfg(not(feature = "hydrate"))]
#[tokio::test]
async fn server_render_drives_pipeline_to_process_failure() {
    let api = HttpApi::default();
    let mut pipeline = docket::DocumentPipeline::new();
    pipeline.select_file(BrowserFile::detached("lease.txt"), "lease.txt");

    let err = docket::workflow::process_document(&api, &mut pipeline).await.unwrap_err();

    assert_eq!(err.user_message(), Some(docket::error::MSG_PROCESS_FAILED));
    assert_eq!(pipeline.upload_error(), Some(docket::error::MSG_PROCESS_FAILED));
}
