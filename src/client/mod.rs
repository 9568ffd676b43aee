use reqwest::{Client, RequestBuilder, StatusCode, header::HeaderMap};

use std::time::Duration;

use crate::{
    dto::{ErrorResponse, NoteDto},
    handlers::rest::{NOTES_PATH, SEARCH_PATH, headers::TOTAL_COUNT_HEADER},
    models::PageRequest,
    ui::alert::Alert,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("note {0} not found")]
    NotFound(i64),

    #[error("server responded {status}: {message}")]
    Http { status: u16, message: String },

    #[error("a new note cannot already have an ID")]
    IdExists,

    #[error("note has no ID")]
    MissingId,
}

/// Successful response body together with the alert the server attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply<T> {
    pub body: T,
    pub alert: Option<Alert>,
}

impl<T> Reply<T> {
    fn new(body: T, headers: &HeaderMap) -> Self {
        Self {
            body,
            alert: Alert::from_headers(headers),
        }
    }
}

/// One page of notes in server order, with the size of the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    pub notes: Vec<NoteDto>,
    pub total_count: u64,
}

/// REST client for the note resource.
#[derive(Debug, Clone)]
pub struct NoteClient {
    http: Client,
    base_url: String,
}

impl NoteClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn create(&self, note: &NoteDto) -> Result<Reply<NoteDto>, ClientError> {
        if note.id.is_some() {
            return Err(ClientError::IdExists);
        }
        tracing::debug!("Creating note");
        let response = send(self.http.post(self.url(NOTES_PATH)).json(note), None).await?;
        let headers = response.headers().clone();
        Ok(Reply::new(response.json().await?, &headers))
    }

    pub async fn update(&self, note: &NoteDto) -> Result<Reply<NoteDto>, ClientError> {
        let id = note.id.ok_or(ClientError::MissingId)?;
        tracing::debug!("Updating note {}", id);
        let response = send(self.http.put(self.url(NOTES_PATH)).json(note), Some(id)).await?;
        let headers = response.headers().clone();
        Ok(Reply::new(response.json().await?, &headers))
    }

    pub async fn find(&self, id: i64) -> Result<NoteDto, ClientError> {
        tracing::debug!("Fetching note {}", id);
        let response = send(self.http.get(self.url(&format!("{NOTES_PATH}/{id}"))), Some(id)).await?;
        Ok(response.json().await?)
    }

    pub async fn query(&self, request: &PageRequest) -> Result<QueryResult, ClientError> {
        tracing::debug!("Querying notes page {}", request.page);
        let builder = self
            .http
            .get(self.url(NOTES_PATH))
            .query(&page_query(request));
        collect(send(builder, None).await?).await
    }

    pub async fn search(
        &self,
        query: &str,
        request: &PageRequest,
    ) -> Result<QueryResult, ClientError> {
        tracing::debug!("Searching notes for {}", query);
        let builder = self
            .http
            .get(self.url(SEARCH_PATH))
            .query(&[("query", query)])
            .query(&page_query(request));
        collect(send(builder, None).await?).await
    }

    pub async fn delete(&self, id: i64) -> Result<Reply<()>, ClientError> {
        tracing::debug!("Deleting note {}", id);
        let response = send(
            self.http.delete(self.url(&format!("{NOTES_PATH}/{id}"))),
            Some(id),
        )
        .await?;
        Ok(Reply::new((), response.headers()))
    }
}

fn page_query(request: &PageRequest) -> [(&'static str, String); 3] {
    [
        ("page", request.page.to_string()),
        ("size", request.size.to_string()),
        ("sort", request.sort.to_string()),
    ]
}

async fn collect(response: reqwest::Response) -> Result<QueryResult, ClientError> {
    let total_count = response
        .headers()
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());
    let notes: Vec<NoteDto> = response.json().await?;
    Ok(QueryResult {
        total_count: total_count.unwrap_or(notes.len() as u64),
        notes,
    })
}

/// Sends the request and turns non-success statuses into `ClientError`.
/// A 404 on a request about `id` becomes `ClientError::NotFound(id)`.
async fn send(builder: RequestBuilder, id: Option<i64>) -> Result<reqwest::Response, ClientError> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND
        && let Some(id) = id
    {
        return Err(ClientError::NotFound(id));
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(error) => error.title,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string(),
    };
    tracing::warn!("Request failed with {}: {}", status, message);

    Err(ClientError::Http {
        status: status.as_u16(),
        message,
    })
}
