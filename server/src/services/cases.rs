//! Case repository: persistence for the legal case catalog.
//!
//! DESIGN
//! ======
//! Handlers only see `dyn CaseRepository`. Postgres backs it in production;
//! the in-memory variant runs when no `DATABASE_URL` is configured and in
//! every router test. Both return cases in insertion order and search with
//! the same case-insensitive title-or-description rule the client applies
//! locally (`docket::filter_cases`).

use async_trait::async_trait;
use docket::{Case, NewCase, filter_cases};
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// All cases, oldest first.
    async fn list(&self) -> Result<Vec<Case>, RepoError>;

    /// Store a validated case and return it with its assigned id.
    async fn insert(&self, case: NewCase) -> Result<Case, RepoError>;

    /// Cases whose title or description contains `query`, ignoring case.
    /// An empty query returns everything.
    async fn search(&self, query: &str) -> Result<Vec<Case>, RepoError>;
}

// =============================================================================
// IN-MEMORY
// =============================================================================

#[derive(Default)]
pub struct MemoryCaseRepository {
    cases: RwLock<Vec<Case>>,
}

impl MemoryCaseRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store, assigning ids to cases that lack one.
    #[must_use]
    pub fn with_cases(cases: impl IntoIterator<Item = Case>) -> Self {
        let cases = cases
            .into_iter()
            .map(|mut c| {
                c.id.get_or_insert_with(|| Uuid::new_v4().to_string());
                c
            })
            .collect();
        Self { cases: RwLock::new(cases) }
    }
}

#[async_trait]
impl CaseRepository for MemoryCaseRepository {
    async fn list(&self) -> Result<Vec<Case>, RepoError> {
        Ok(self.cases.read().await.clone())
    }

    async fn insert(&self, case: NewCase) -> Result<Case, RepoError> {
        let case = case.into_case(Some(Uuid::new_v4().to_string()));
        self.cases.write().await.push(case.clone());
        Ok(case)
    }

    async fn search(&self, query: &str) -> Result<Vec<Case>, RepoError> {
        Ok(filter_cases(&self.cases.read().await, query))
    }
}

// =============================================================================
// POSTGRES
// =============================================================================

pub struct PgCaseRepository {
    pool: PgPool,
}

impl PgCaseRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type CaseRow = (Uuid, String, String, String);

fn row_to_case((id, title, description, image_url): CaseRow) -> Case {
    Case { id: Some(id.to_string()), title, description, image_url }
}

/// Escape `LIKE` metacharacters so user text matches literally.
fn like_pattern(query: &str) -> String {
    let mut out = String::with_capacity(query.len() + 2);
    out.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

#[async_trait]
impl CaseRepository for PgCaseRepository {
    async fn list(&self) -> Result<Vec<Case>, RepoError> {
        let rows = sqlx::query_as::<_, CaseRow>("SELECT id, title, description, image_url FROM cases ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_case).collect())
    }

    async fn insert(&self, case: NewCase) -> Result<Case, RepoError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO cases (id, title, description, image_url) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(case.title())
            .bind(case.description())
            .bind(case.image_url())
            .execute(&self.pool)
            .await?;
        info!(%id, "cases: inserted");
        Ok(case.into_case(Some(id.to_string())))
    }

    async fn search(&self, query: &str) -> Result<Vec<Case>, RepoError> {
        if query.is_empty() {
            return self.list().await;
        }
        let rows = sqlx::query_as::<_, CaseRow>(
            "SELECT id, title, description, image_url FROM cases \
             WHERE title ILIKE $1 OR description ILIKE $1 ORDER BY seq",
        )
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(row_to_case).collect())
    }
}

#[cfg(test)]
#[path = "cases_test.rs"]
mod tests;
