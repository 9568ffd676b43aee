mod common;

use note_maker::{
    client::ClientError,
    dto::NoteDto,
    models::PageRequest,
    ui::alert::AlertKind,
};

#[tokio::test]
async fn create_assigns_id_and_keeps_text() {
    let base = common::spawn_server().await;
    let client = common::client(&base);

    let reply = client.create(&NoteDto::new("T")).await.unwrap();
    assert!(reply.body.id.is_some());
    assert_eq!(reply.body.text.as_deref(), Some("T"));

    let alert = reply.alert.expect("creation alert");
    assert_eq!(alert.kind, AlertKind::Success);
    assert_eq!(alert.params.as_deref(), Some("1"));
}

#[tokio::test]
async fn update_is_visible_to_find() {
    let base = common::spawn_server().await;
    let client = common::client(&base);
    for i in 1..=5 {
        client.create(&NoteDto::new(format!("note {i}"))).await.unwrap();
    }

    client.update(&NoteDto::with_id(5, "U")).await.unwrap();
    assert_eq!(client.find(5).await.unwrap(), NoteDto::with_id(5, "U"));
}

#[tokio::test]
async fn delete_makes_find_fail_with_not_found() {
    let base = common::spawn_server().await;
    let client = common::client(&base);
    for i in 1..=5 {
        client.create(&NoteDto::new(format!("note {i}"))).await.unwrap();
    }

    client.delete(5).await.unwrap();
    assert!(matches!(client.find(5).await, Err(ClientError::NotFound(5))));
    assert!(matches!(client.delete(5).await, Err(ClientError::NotFound(5))));
}

#[tokio::test]
async fn update_of_missing_note_is_not_found() {
    let base = common::spawn_server().await;
    let client = common::client(&base);
    let result = client.update(&NoteDto::with_id(42, "x")).await;
    assert!(matches!(result, Err(ClientError::NotFound(42))));
}

#[tokio::test]
async fn query_reflects_server_collection_after_each_mutation() {
    let base = common::spawn_server().await;
    let client = common::client(&base);
    let request = PageRequest::default();

    let a = client.create(&NoteDto::new("a")).await.unwrap().body;
    let b = client.create(&NoteDto::new("b")).await.unwrap().body;
    let result = client.query(&request).await.unwrap();
    assert_eq!(result.notes, vec![a.clone(), b.clone()]);
    assert_eq!(result.total_count, 2);

    let b = client
        .update(&NoteDto::with_id(b.id.unwrap(), "b2"))
        .await
        .unwrap()
        .body;
    let result = client.query(&request).await.unwrap();
    assert_eq!(result.notes, vec![a.clone(), b]);

    client.delete(a.id.unwrap()).await.unwrap();
    let result = client.query(&request).await.unwrap();
    assert_eq!(result.notes.len(), 1);
    assert_eq!(result.total_count, 1);
    assert!(!result.notes.contains(&a));
}

#[tokio::test]
async fn search_returns_matching_notes() {
    let base = common::spawn_server().await;
    let client = common::client(&base);
    client.create(&NoteDto::new("Buy milk")).await.unwrap();
    client.create(&NoteDto::new("Call mum")).await.unwrap();

    let result = client.search("MILK", &PageRequest::default()).await.unwrap();
    assert_eq!(result.notes, vec![NoteDto::with_id(1, "Buy milk")]);
    assert_eq!(result.total_count, 1);
}

#[tokio::test]
async fn buy_milk_scenario() {
    let base = common::spawn_server().await;
    let client = common::client(&base);

    let created = client.create(&NoteDto::new("Buy milk")).await.unwrap().body;
    assert_eq!(created, NoteDto::with_id(1, "Buy milk"));

    let list = client.query(&PageRequest::default()).await.unwrap();
    assert_eq!(list.notes, vec![NoteDto::with_id(1, "Buy milk")]);

    client
        .update(&NoteDto::with_id(1, "Buy milk and eggs"))
        .await
        .unwrap();
    assert_eq!(
        client.find(1).await.unwrap(),
        NoteDto::with_id(1, "Buy milk and eggs")
    );

    client.delete(1).await.unwrap();
    assert!(matches!(client.find(1).await, Err(ClientError::NotFound(1))));
}
