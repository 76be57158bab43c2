//! Server configuration parsed from environment variables.
//!
//! `main` loads `.env` through `dotenvy` first, so every key here can live in
//! a dotenv file during development.

use std::num::ParseIntError;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_RAG_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_RAG_SIMILAR_CASES: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {source}")]
    InvalidNumber {
        key: &'static str,
        #[source]
        source: ParseIntError,
    },
}

/// Knobs for the document pipeline endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RagSettings {
    pub max_upload_bytes: usize,
    pub similar_cases: usize,
    /// Completion budget; `main` copies it from the LLM config.
    pub max_tokens: u32,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_RAG_MAX_UPLOAD_BYTES,
            similar_cases: DEFAULT_RAG_SIMILAR_CASES,
            max_tokens: crate::llm::config::DEFAULT_LLM_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// `None` runs the case store in memory.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// `None` allows any origin.
    pub cors_allow_origin: Option<String>,
    pub rag: RagSettings,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric key is set but
    /// does not parse. Unset keys take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let rag = RagSettings {
            max_upload_bytes: env_number("RAG_MAX_UPLOAD_BYTES", DEFAULT_RAG_MAX_UPLOAD_BYTES)?,
            similar_cases: env_number("RAG_SIMILAR_CASES", DEFAULT_RAG_SIMILAR_CASES)?,
            max_tokens: crate::llm::config::DEFAULT_LLM_MAX_TOKENS,
        };
        Ok(Self {
            port: env_number("PORT", DEFAULT_PORT)?,
            database_url: env_non_empty("DATABASE_URL"),
            db_max_connections: env_number("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            cors_allow_origin: env_non_empty("CORS_ALLOW_ORIGIN").filter(|v| v != "*"),
            rag,
        })
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn env_number<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    match env_non_empty(key) {
        Some(raw) => raw
            .parse()
            .map_err(|source| ConfigError::InvalidNumber { key, source }),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
