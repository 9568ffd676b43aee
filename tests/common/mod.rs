use std::{sync::Arc, time::Duration};

use axum::Router;
use note_maker::{
    client::NoteClient, repository::MemoryRepository, server::build_router, service::NoteService,
};

/// Serves a fresh in-memory note server on an ephemeral port and returns its base URL.
pub async fn spawn_server() -> String {
    let service = Arc::new(NoteService::new(Arc::new(MemoryRepository::new())));
    serve(build_router(service)).await
}

/// Serves `app` on an ephemeral port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });

    format!("http://{addr}")
}

#[allow(dead_code)]
pub fn client(base_url: &str) -> NoteClient {
    NoteClient::new(base_url, Duration::from_secs(5)).expect("build client")
}
