//! LLM: multi-provider chat adapter behind the RAG endpoints.
//!
//! DESIGN
//! ======
//! Configured from environment variables. The `LlmClient` enum dispatches to
//! Gemini, Anthropic or `OpenAI` based on `LLM_PROVIDER`. Everything above
//! this module talks to `dyn LlmChat` so handlers can be tested with a mock.

pub mod anthropic;
pub mod config;
pub mod gemini;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::{ChatResponse, LlmChat, LlmError, Message};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client for the configured provider.
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
    provider: LlmProviderKind,
    max_tokens: u32,
}

enum LlmProvider {
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
    Gemini(gemini::GeminiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = match config.provider {
            LlmProviderKind::Anthropic => {
                LlmProvider::Anthropic(anthropic::AnthropicClient::new(config.api_key, config.timeouts)?)
            }
            LlmProviderKind::OpenAi => LlmProvider::OpenAi(openai::OpenAiClient::new(
                config.api_key,
                config.openai_mode,
                config.openai_base_url,
                config.timeouts,
            )?),
            LlmProviderKind::Gemini => {
                LlmProvider::Gemini(gemini::GeminiClient::new(config.api_key, config.gemini_base_url, config.timeouts)?)
            }
        };
        Ok(Self { inner, model: config.model, provider: config.provider, max_tokens: config.max_tokens })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn provider(&self) -> &'static str {
        self.provider.as_str()
    }

    /// Configured completion budget (`LLM_MAX_TOKENS`).
    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        let response = match &self.inner {
            LlmProvider::Anthropic(c) => c.chat(&self.model, max_tokens, system, messages).await,
            LlmProvider::OpenAi(c) => c.chat(&self.model, max_tokens, system, messages).await,
            LlmProvider::Gemini(c) => c.chat(&self.model, max_tokens, system, messages).await,
        }?;
        response.non_empty(self.provider())
    }
}
