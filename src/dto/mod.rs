use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{DEFAULT_PAGE_SIZE, Note, PageRequest, Sort, SortError};

/// Note record exchanged over the wire. The id is absent until the note is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteDto {
    /// Note ID, assigned by the server
    #[serde(default)]
    pub id: Option<i64>,
    /// Note text
    #[serde(default)]
    pub text: Option<String>,
}

impl NoteDto {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: Some(text.into()),
        }
    }

    pub fn with_id(id: i64, text: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            text: Some(text.into()),
        }
    }
}

impl From<Note> for NoteDto {
    fn from(note: Note) -> Self {
        Self {
            id: Some(note.id),
            text: note.text,
        }
    }
}

/// Error payload returned with every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Message key, e.g. `error.notfound`
    pub message: String,
    /// Human readable description
    pub title: String,
}

/// Paging parameters accepted by the collection endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index
    pub page: Option<u32>,
    /// Page size
    pub size: Option<u32>,
    /// Sort order, `property[,asc|desc]`
    pub sort: Option<String>,
}

impl PageParams {
    pub fn to_request(&self) -> Result<PageRequest, SortError> {
        let sort = match self.sort.as_deref() {
            Some(sort) => sort.parse()?,
            None => Sort::default(),
        };
        Ok(PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            sort,
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Search query: free text, or `id:<n>` for an exact id
    #[serde(default)]
    pub query: String,
}
