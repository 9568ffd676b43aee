use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{
    handlers::rest::{self, NOTES_PATH, SEARCH_PATH},
    service::NoteService,
};

pub fn build_router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            NOTES_PATH,
            get(rest::get_all_notes)
                .post(rest::create_note)
                .put(rest::update_note),
        )
        .route(
            &format!("{NOTES_PATH}/{{id}}"),
            get(rest::get_note).delete(rest::delete_note),
        )
        .route(SEARCH_PATH, get(rest::search_notes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Note maker is up").into_response()
}
