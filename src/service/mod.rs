use std::sync::Arc;

use crate::{
    dto::NoteDto,
    models::{Page, PageRequest},
    repository::{NoteRepository, RepositoryError, SearchQuery},
};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("a new note cannot already have an ID")]
    IdExists,

    #[error("note {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    /// Persists a note that has no id yet.
    pub async fn create(&self, note: NoteDto) -> Result<NoteDto, ServiceError> {
        tracing::debug!("Request to create Note : {:?}", note);
        if note.id.is_some() {
            return Err(ServiceError::IdExists);
        }

        Ok(self.repo.insert(note.text).await?.into())
    }

    /// Inserts when the note has no id, otherwise updates the stored note.
    pub async fn save(&self, note: NoteDto) -> Result<NoteDto, ServiceError> {
        tracing::debug!("Request to save Note : {:?}", note);
        match note.id {
            None => Ok(self.repo.insert(note.text).await?.into()),
            Some(id) => self
                .repo
                .update(id, note.text)
                .await?
                .map(NoteDto::from)
                .ok_or(ServiceError::NotFound(id)),
        }
    }

    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<NoteDto>, ServiceError> {
        tracing::debug!("Request to get all Notes");
        Ok(self.repo.find_page(request).await?.map(NoteDto::from))
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<NoteDto>, ServiceError> {
        tracing::debug!("Request to get Note : {}", id);
        Ok(self.repo.find(id).await?.map(NoteDto::from))
    }

    /// Returns `false` when there was nothing to delete.
    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        tracing::debug!("Request to delete Note : {}", id);
        Ok(self.repo.delete(id).await?)
    }

    pub async fn search(
        &self,
        query: &str,
        request: &PageRequest,
    ) -> Result<Page<NoteDto>, ServiceError> {
        tracing::debug!("Request to search for a page of Notes for query {}", query);
        let query = SearchQuery::parse(query);
        Ok(self.repo.search(&query, request).await?.map(NoteDto::from))
    }
}
