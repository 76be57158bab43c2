use super::*;

fn make_response(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "msg_123",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 100, "output_tokens": 50 }
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "The lease is enforceable." }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.text, "The lease is enforceable.");
    assert_eq!(resp.model, "claude-sonnet-4-5-20250929");
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 100);
    assert_eq!(resp.output_tokens, 50);
}

#[test]
fn parse_joins_multiple_text_blocks() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "Part one." },
        { "type": "text", "text": "Part two." }
    ]));
    assert_eq!(parse_response(&json).unwrap().text, "Part one.\nPart two.");
}

#[test]
fn parse_skips_thinking_and_unknown_blocks() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "Let me think..." },
        { "type": "some_future_type", "data": {} },
        { "type": "text", "text": "Here is my answer" }
    ]));
    assert_eq!(parse_response(&json).unwrap().text, "Here is my answer");
}

#[test]
fn parse_thinking_only_response_is_empty() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "Let me think..." }
    ]));
    assert!(parse_response(&json).unwrap().text.is_empty());
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn request_omits_empty_system() {
    let messages = [Message::user("hi")];
    let body = ApiRequest { model: "m", max_tokens: 10, system: "", messages: &messages };
    let json = serde_json::to_value(&body).unwrap();
    assert!(json.get("system").is_none());
    assert_eq!(json["messages"][0]["content"], "hi");
}
