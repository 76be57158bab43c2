//! Google Gemini `generateContent` client.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{ChatResponse, LlmError, Message, Role, STOP_END_TURN, STOP_MAX_TOKENS};

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// # Errors
    ///
    /// Transport failures, non-200 statuses and unparseable bodies.
    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let body = build_request(max_tokens, system, messages);
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(model, &text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

fn build_request<'a>(max_tokens: u32, system: &'a str, messages: &'a [Message]) -> GenerateRequest<'a> {
    let system_instruction =
        (!system.trim().is_empty()).then(|| Content { role: None, parts: [Part { text: system }] });
    let contents = messages
        .iter()
        .map(|m| Content {
            role: Some(match m.role {
                Role::User => "user",
                Role::Assistant => "model",
            }),
            parts: [Part { text: &m.content }],
        })
        .collect();
    GenerateRequest { system_instruction, contents, generation_config: GenerationConfig { max_output_tokens: max_tokens } }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(requested_model: &str, json_text: &str) -> Result<ChatResponse, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(candidate) = root
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        let reason = root
            .get("promptFeedback")
            .and_then(|f| f.get("blockReason"))
            .and_then(Value::as_str)
            .unwrap_or("no candidates");
        return Err(LlmError::ApiParse(format!("gemini: {reason}")));
    };

    let text = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let stop_reason = match candidate.get("finishReason").and_then(Value::as_str) {
        Some("MAX_TOKENS") => STOP_MAX_TOKENS,
        _ => STOP_END_TURN,
    };
    let usage = |key: &str| {
        root.get("usageMetadata")
            .and_then(|u| u.get(key))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    };
    let model = root
        .get("modelVersion")
        .and_then(Value::as_str)
        .unwrap_or(requested_model)
        .to_string();

    Ok(ChatResponse {
        text,
        model,
        stop_reason: stop_reason.to_string(),
        input_tokens: usage("promptTokenCount"),
        output_tokens: usage("candidatesTokenCount"),
    })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
