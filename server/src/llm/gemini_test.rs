use super::*;

#[test]
fn parse_text_response() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": "Summary: " }, { "text": "a lease." }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 30, "candidatesTokenCount": 6 },
        "modelVersion": "gemini-2.0-flash-001"
    })
    .to_string();
    let resp = parse_response("gemini-2.0-flash", &json).unwrap();
    assert_eq!(resp.text, "Summary: a lease.");
    assert_eq!(resp.model, "gemini-2.0-flash-001");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 30);
    assert_eq!(resp.output_tokens, 6);
}

#[test]
fn parse_max_tokens_and_model_fallback() {
    let json = serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "cut" }] }, "finishReason": "MAX_TOKENS" }]
    })
    .to_string();
    let resp = parse_response("gemini-2.0-flash", &json).unwrap();
    assert_eq!(resp.stop_reason, "max_tokens");
    assert_eq!(resp.model, "gemini-2.0-flash");
}

#[test]
fn parse_blocked_prompt_reports_reason() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let err = parse_response("m", &json).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(ref msg) if msg.contains("SAFETY")));
}

#[test]
fn parse_invalid_json() {
    assert!(matches!(parse_response("m", "{").unwrap_err(), LlmError::ApiParse(_)));
}

#[test]
fn request_maps_roles_and_system() {
    let messages = [Message::user("q"), Message::assistant("a")];
    let json = serde_json::to_value(build_request(256, "sys", &messages)).unwrap();
    assert_eq!(json["systemInstruction"]["parts"][0]["text"], "sys");
    assert_eq!(json["contents"][0]["role"], "user");
    assert_eq!(json["contents"][1]["role"], "model");
    assert_eq!(json["generationConfig"]["maxOutputTokens"], 256);
}

#[test]
fn request_omits_blank_system() {
    let messages = [Message::user("q")];
    let json = serde_json::to_value(build_request(1, " ", &messages)).unwrap();
    assert!(json.get("systemInstruction").is_none());
}
