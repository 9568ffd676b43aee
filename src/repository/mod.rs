mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;

use std::sync::Arc;

use crate::{
    config::{Config, StorageKind},
    models::{Note, Page, PageRequest},
};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),

    #[error("postgres storage selected but no DSN configured")]
    MissingDsn,
}

/// Parsed search expression. `id:<n>` selects one id, anything else matches text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Id(i64),
    Text(String),
}

impl SearchQuery {
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        query
            .strip_prefix("id:")
            .and_then(|id| id.trim().parse().ok())
            .map_or_else(|| Self::Text(query.to_string()), Self::Id)
    }
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn insert(&self, text: Option<String>) -> Result<Note, RepositoryError>;

    /// Returns `None` when no note has the given id.
    async fn update(&self, id: i64, text: Option<String>) -> Result<Option<Note>, RepositoryError>;

    /// Returns `false` when no note has the given id.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn find(&self, id: i64) -> Result<Option<Note>, RepositoryError>;

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Note>, RepositoryError>;

    async fn search(
        &self,
        query: &SearchQuery,
        request: &PageRequest,
    ) -> Result<Page<Note>, RepositoryError>;
}

/// Builds the repository selected by the configuration, migrating postgres storage.
pub async fn connect(config: &Config) -> Result<Arc<dyn NoteRepository>, RepositoryError> {
    match config.storage {
        StorageKind::Memory => {
            tracing::info!("Using in-memory note storage");
            Ok(Arc::new(MemoryRepository::new()))
        }
        StorageKind::Postgres => {
            let dsn = config.pg_dsn.clone().ok_or(RepositoryError::MissingDsn)?;
            let mut repo = PgRepository::new(&dsn).await?;
            repo.migrate().await?;
            Ok(Arc::new(repo))
        }
    }
}
