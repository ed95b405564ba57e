//! End-to-end tests against a live server on an ephemeral port.

use lru_store::{api::create_router, AppState, Config, FileStore, LruStore, StoreOptions};
use serde_json::{json, Value};
use tempfile::tempdir;

// == Helper Functions ==

/// Serves `state` on 127.0.0.1 and returns the base URL.
async fn spawn_server(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_round_trip_over_tcp() {
    let state = AppState::in_memory(StoreOptions::new("tcp", 2)).unwrap();
    let base = spawn_server(state).await;
    let client = reqwest::Client::new();

    for (key, amount) in [("tree", 10), ("jenny", 11), ("vicanso", 12)] {
        let response = client
            .put(format!("{base}/set"))
            .json(&json!({"key": key, "value": {"amount": amount}}))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let missing = client.get(format!("{base}/get/tree")).send().await.unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    let jenny: Value = client
        .get(format!("{base}/get/jenny"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(jenny["value"]["amount"], 11);

    let keys: Value = client
        .get(format!("{base}/keys"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(keys["keys"], json!(["vicanso", "jenny"]));
}

#[tokio::test]
async fn test_file_backed_server_persists_namespace() {
    let dir = tempdir().unwrap();
    let config = Config {
        namespace: "sessions".to_string(),
        max_entries: 3,
        data_dir: Some(dir.path().to_path_buf()),
        ..Config::default()
    };

    let base = spawn_server(AppState::from_config(&config).unwrap()).await;
    let client = reqwest::Client::new();
    for key in ["a", "b", "c", "d"] {
        client
            .put(format!("{base}/set"))
            .json(&json!({"key": key, "value": key}))
            .send()
            .await
            .unwrap();
    }

    // a fresh store on the same directory sees what the server wrote
    let files = FileStore::open(dir.path()).unwrap();
    let reopened: LruStore<Value, FileStore> =
        LruStore::with_store(StoreOptions::new("sessions", 2), files).unwrap();
    assert_eq!(reopened.keys(), vec!["c", "d"]);

    let cleared = client.delete(format!("{base}/clear")).send().await.unwrap();
    assert!(cleared.status().is_success());
    assert!(!dir.path().join("sessions.json").exists());
}
