//! Room store tests against a local mock PostgREST server.

use mockito::Matcher;
use room_store::{KnowledgeError, KnowledgeSource, RoomStore, RoomStoreConfig, ROOM_COLUMNS};

fn store_for(server: &mockito::Server) -> RoomStore {
    RoomStore::new(RoomStoreConfig::new(server.url(), "service-key")).unwrap()
}

#[tokio::test]
async fn test_lists_rooms_cheapest_first() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/rooms")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), ROOM_COLUMNS.into()),
            Matcher::UrlEncoded("order".into(), "rate.asc".into()),
        ]))
        .match_header("apikey", "service-key")
        .match_header("authorization", "Bearer service-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"room_name": "Pool Villa", "rate": 12000, "description": "Private pool",
                 "size": 850, "check_in_time": "2 PM", "check_out_time": "11 AM"},
                {"room_name": "Deluxe Lawn View", "rate": "6,500", "description": null,
                 "size": "400", "check_in_time": "2 PM", "check_out_time": "11 AM"}
            ]"#,
        )
        .create_async()
        .await;

    let store = store_for(&server);
    let rooms = store.list_rooms_by_ascending_rate().await.unwrap();

    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0].display_name, "Deluxe Lawn View");
    assert_eq!(rooms[0].rate, 6500);
    assert_eq!(rooms[0].description, "");
    assert_eq!(rooms[1].display_name, "Pool Villa");
    assert_eq!(rooms[1].size_sq_ft, "850");
    assert_eq!(rooms[1].media_folder_key(), "pool_villa");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_custom_table() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/cottages")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let store =
        RoomStore::new(RoomStoreConfig::new(server.url(), "k").with_table("cottages")).unwrap();
    let rooms = store.list_rooms_by_ascending_rate().await.unwrap();

    assert!(rooms.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_is_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/rooms")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Invalid API key"}"#)
        .create_async()
        .await;

    let err = store_for(&server)
        .list_rooms_by_ascending_rate()
        .await
        .unwrap_err();

    assert!(matches!(err, KnowledgeError::Unavailable(_)));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_bad_payload_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/rooms")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"not": "a list"}"#)
        .create_async()
        .await;

    let err = store_for(&server)
        .list_rooms_by_ascending_rate()
        .await
        .unwrap_err();

    assert!(matches!(err, KnowledgeError::Malformed(_)));
}
