mod config;
mod db;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::services::cases::{CaseRepository, MemoryCaseRepository, PgCaseRepository};

#[tokio::main]
async fn main() {
    // Missing .env is normal outside development.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    let cases: Arc<dyn CaseRepository> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = db::init_pool(url, config.db_max_connections)
                .await
                .expect("database init failed");
            Arc::new(PgCaseRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; cases are kept in memory and lost on restart");
            Arc::new(MemoryCaseRepository::new())
        }
    };

    // Non-fatal: RAG endpoints answer 503 without an LLM.
    let mut rag = config.rag;
    let llm: Option<Arc<dyn llm::LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(provider = client.provider(), model = client.model(), "LLM client initialized");
            rag.max_tokens = client.max_tokens();
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; document features disabled");
            None
        }
    };

    let state = state::AppState::new(cases, llm, rag);
    let origin = config.cors_allow_origin.as_deref();

    let app = match routes::leptos_app(state.clone(), origin) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "serving API only");
            routes::api_routes(state, origin)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "lexgenie listening");
    axum::serve(listener, app).await.expect("server failed");
}
