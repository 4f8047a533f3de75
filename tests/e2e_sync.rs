//! E2E tests for replace-style sync and storage-less operation

mod common;

use common::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn test_sync_replaces_everything() {
    let server = TestServer::new().await;
    for name in ["old-1", "old-2"] {
        server
            .create_restaurant(json!({"name": name, "address": "Str. Veche 1"}))
            .await;
    }

    let response = server
        .client
        .post(server.url("/api/sync"))
        .json(&json!({
            "restaurants": [
                {"id": 900, "zone": "1", "name": "r1", "address": "A1"},
                {"id": 901, "zone": "2", "name": "r2", "address": "A2", "type": "Pizzerie"},
                {"zone": "3", "name": "r3", "address": "A3", "phone": "021"}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["count"], 3);

    let listed = server.list_restaurants().await;
    assert_eq!(listed.len(), 3);

    let names: Vec<&str> = listed.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["r1", "r2", "r3"]);
    assert_eq!(listed[1]["type"], "Pizzerie");
    assert_eq!(listed[2]["phone"], "021");

    // Caller ids are ignored.
    assert!(listed.iter().all(|r| r["id"] != 900 && r["id"] != 901));
}

#[tokio::test]
async fn test_sync_accepts_client_side_ids_and_timestamps() {
    let server = TestServer::new().await;

    let response = server
        .client
        .post(server.url("/api/sync"))
        .json(&json!({
            "restaurants": [
                {"id": "local-1", "createdAt": "2024-05-01 10:00:00", "name": "r1", "address": "A1"},
                {"id": null, "createdAt": 1714557600, "name": "r2", "address": "A2"}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["count"], 2);

    let listed = server.list_restaurants().await;
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|r| r["id"].is_i64()));
    assert_ne!(listed[0]["createdAt"], "2024-05-01 10:00:00");
}

#[tokio::test]
async fn test_sync_with_empty_list_clears_storage() {
    let server = TestServer::new().await;
    server
        .create_restaurant(json!({"name": "X", "address": "Y"}))
        .await;

    let response = server
        .client
        .post(server.url("/api/sync"))
        .json(&json!({"restaurants": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(server.list_restaurants().await.is_empty());
}

#[tokio::test]
async fn test_sync_with_invalid_item_keeps_prior_state() {
    let server = TestServer::new().await;
    server
        .create_restaurant(json!({"name": "keep", "address": "me"}))
        .await;

    let response = server
        .client
        .post(server.url("/api/sync"))
        .json(&json!({"restaurants": [{"name": "", "address": "A"}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let listed = server.list_restaurants().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "keep");
}

#[tokio::test]
async fn test_ids_are_fresh_after_sync() {
    let server = TestServer::new().await;
    let first = server
        .create_restaurant(json!({"name": "X", "address": "Y"}))
        .await;

    server
        .client
        .post(server.url("/api/sync"))
        .json(&json!({"restaurants": [{"name": "X", "address": "Y"}]}))
        .send()
        .await
        .unwrap();

    let listed = server.list_restaurants().await;
    assert!(listed[0]["id"].as_i64().unwrap() > first["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_without_storage_reads_degrade() {
    let server = TestServer::without_storage().await;

    let response = server
        .client
        .get(server.url("/api/restaurants"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["error"], "No database");
}

#[tokio::test]
async fn test_without_storage_writes_fail() {
    let server = TestServer::without_storage().await;

    let create = server
        .client
        .post(server.url("/api/restaurants"))
        .json(&json!({"name": "X", "address": "Y"}))
        .send()
        .await
        .unwrap();
    assert_eq!(create.status(), 500);
    let body: Value = create.json().await.unwrap();
    assert_eq!(body["error"], "No database");

    let sync = server
        .client
        .post(server.url("/api/sync"))
        .json(&json!({"restaurants": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(sync.status(), 500);

    let delete_all = server
        .client
        .delete(server.url("/api/restaurants"))
        .send()
        .await
        .unwrap();
    assert_eq!(delete_all.status(), 500);
}

#[tokio::test]
async fn test_unreachable_storage_degrades_reads_and_fails_writes() {
    let server = TestServer::new().await;
    server
        .create_restaurant(json!({"name": "X", "address": "Y"}))
        .await;
    server.state.storage.database().unwrap().close().await;

    let health: Value = server
        .client
        .get(server.url("/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["database"], false);

    let response = server
        .client
        .get(server.url("/api/restaurants"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["error"], "No database");

    let create = server
        .client
        .post(server.url("/api/restaurants"))
        .json(&json!({"name": "X", "address": "Y"}))
        .send()
        .await
        .unwrap();
    assert_eq!(create.status(), 500);
    let body: Value = create.json().await.unwrap();
    assert_eq!(body["error"], "No database");
}
