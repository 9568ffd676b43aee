pub mod headers;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{ErrorResponse, NoteDto, PageParams, SearchParams},
    models::PageRequest,
    service::{NoteService, ServiceError},
};

pub const NOTES_PATH: &str = "/api/notes";
pub const SEARCH_PATH: &str = "/api/_search/notes";

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        update_note,
        get_all_notes,
        get_note,
        delete_note,
        search_notes
    ),
    components(schemas(NoteDto, ErrorResponse)),
    tags(
        (name = "notes", description = "Note management API")
    )
)]
pub struct ApiDoc;

fn error_response(status: StatusCode, key: &str, title: impl Into<String>) -> Response {
    let body = ErrorResponse {
        status: status.as_u16(),
        message: format!("error.{key}"),
        title: title.into(),
    };
    (status, headers::failure_alert(key), Json(body)).into_response()
}

fn service_failure(error: &ServiceError, action: &str) -> Response {
    match error {
        ServiceError::IdExists => error_response(
            StatusCode::BAD_REQUEST,
            "idexists",
            "A new note cannot already have an ID",
        ),
        ServiceError::NotFound(id) => {
            error_response(StatusCode::NOT_FOUND, "notfound", format!("Note {id} not found"))
        }
        ServiceError::Repository(e) => {
            tracing::error!("failed to {} note entry: {}", action, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                format!("Failed to {action} note"),
            )
        }
    }
}

fn invalid_body(rejection: &JsonRejection) -> Response {
    tracing::warn!("rejected note payload: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, "validation", rejection.body_text())
}

fn invalid_query(rejection: &QueryRejection) -> Response {
    tracing::warn!("rejected query string: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, "validation", rejection.body_text())
}

fn invalid_id(rejection: &PathRejection) -> Response {
    tracing::warn!("rejected note id: {}", rejection.body_text());
    error_response(StatusCode::BAD_REQUEST, "validation", rejection.body_text())
}

fn invalid_paging(params: &PageParams) -> Result<PageRequest, Response> {
    params
        .to_request()
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, "validation", e.to_string()))
}

fn created(note: NoteDto) -> Response {
    let id = note.id.unwrap_or_default();
    let mut headers = headers::entity_alert("created", id);
    if let Ok(location) = HeaderValue::from_str(&format!("{NOTES_PATH}/{id}")) {
        headers.insert(header::LOCATION, location);
    }
    (StatusCode::CREATED, headers, Json(note)).into_response()
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = NoteDto,
    responses(
        (status = 201, description = "Note created successfully", body = NoteDto),
        (status = 400, description = "Note already has an ID or body is malformed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<NoteDto>, JsonRejection>,
) -> Response {
    let Json(note) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_body(&rejection),
    };

    match service.create(note).await {
        Ok(note) => created(note),
        Err(e) => service_failure(&e, "create"),
    }
}

#[utoipa::path(
    put,
    path = "/api/notes",
    request_body = NoteDto,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteDto),
        (status = 201, description = "Note had no ID and was created", body = NoteDto),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<NoteDto>, JsonRejection>,
) -> Response {
    let Json(note) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return invalid_body(&rejection),
    };

    let is_new = note.id.is_none();
    match service.save(note).await {
        Ok(note) if is_new => created(note),
        Ok(note) => {
            let headers = headers::entity_alert("updated", note.id.unwrap_or_default());
            (StatusCode::OK, headers, Json(note)).into_response()
        }
        Err(e) => service_failure(&e, "update"),
    }
}

#[utoipa::path(
    get,
    path = "/api/notes",
    params(PageParams),
    responses(
        (status = 200, description = "Page of notes, with X-Total-Count and Link headers", body = Vec<NoteDto>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(
    State(service): State<Arc<NoteService>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return invalid_query(&rejection),
    };
    let request = match invalid_paging(&params) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match service.find_all(&request).await {
        Ok(page) => {
            let headers = headers::pagination(&page, NOTES_PATH);
            (StatusCode::OK, headers, Json(page.content)).into_response()
        }
        Err(e) => service_failure(&e, "list"),
    }
}

#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteDto),
        (status = 400, description = "Malformed note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return invalid_id(&rejection),
    };

    match service.find_one(id).await {
        Ok(Some(note)) => (StatusCode::OK, Json(note)).into_response(),
        Ok(None) => service_failure(&ServiceError::NotFound(id), "get"),
        Err(e) => service_failure(&e, "get"),
    }
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully"),
        (status = 400, description = "Malformed note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return invalid_id(&rejection),
    };

    match service.delete(id).await {
        Ok(true) => (StatusCode::OK, headers::entity_alert("deleted", id)).into_response(),
        Ok(false) => service_failure(&ServiceError::NotFound(id), "delete"),
        Err(e) => service_failure(&e, "delete"),
    }
}

#[utoipa::path(
    get,
    path = "/api/_search/notes",
    params(SearchParams, PageParams),
    responses(
        (status = 200, description = "Page of matching notes", body = Vec<NoteDto>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn search_notes(
    State(service): State<Arc<NoteService>>,
    search: Result<Query<SearchParams>, QueryRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Response {
    let (Query(search), Query(params)) = match (search, params) {
        (Ok(search), Ok(params)) => (search, params),
        (Err(rejection), _) | (_, Err(rejection)) => return invalid_query(&rejection),
    };
    let request = match invalid_paging(&params) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match service.search(&search.query, &request).await {
        Ok(page) => {
            let mut headers = headers::pagination(&page, SEARCH_PATH);
            extend_query(&mut headers, &search.query);
            (StatusCode::OK, headers, Json(page.content)).into_response()
        }
        Err(e) => service_failure(&e, "search"),
    }
}

// Search links must repeat the query so following them stays within the result set.
fn extend_query(headers: &mut HeaderMap, query: &str) {
    let Some(link) = headers.get(header::LINK).and_then(|v| v.to_str().ok()) else {
        return;
    };
    let encoded = urlencoding::encode(query);
    let rewritten = link.replace("?page=", &format!("?query={encoded}&page="));
    if let Ok(value) = HeaderValue::from_str(&rewritten) {
        headers.insert(header::LINK, value);
    }
}
