//! HTTP API integration tests.
//!
//! Tests for the health check, roster and HTML endpoints.

mod fixtures;
use fixtures::TestServer;

use kotozute_server::ServerConfig;
use tokio_tungstenite::connect_async;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_roster_endpoint_empty() {
    // テスト項目: 誰も接続していなければ /api/roster は空配列を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(format!("{}/api/roster", server.base_url()))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    // then (期待する結果):
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_roster_endpoint_lists_sessions() {
    // テスト項目: /api/roster は接続中のセッションを返す
    // given (前提条件):
    let server = TestServer::start().await;
    let (_alice, _) = connect_async(server.ws_url("alice"))
        .await
        .expect("Failed to connect");
    server.wait_for_roster(&["alice"]).await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(format!("{}/api/roster", server.base_url()))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    // then (期待する結果):
    let entries = body.as_array().expect("Response should be an array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["identity"], "alice");
    assert!(entries[0]["session_id"].is_string());
    assert!(entries[0]["connected_at"].is_string());
}

#[tokio::test]
async fn test_index_serves_html() {
    // テスト項目: / は設定された HTML ファイルを返す
    // given (前提条件):
    let path = std::env::temp_dir().join(format!("kotozute-home-{}.html", std::process::id()));
    std::fs::write(&path, "<html><body>relay</body></html>").expect("Failed to write html");
    let server = TestServer::start_with(ServerConfig {
        html_path: path.clone(),
        ..ServerConfig::default()
    })
    .await;

    // when (操作):
    let response = reqwest::get(server.base_url())
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert_eq!(
        response.text().await.unwrap(),
        "<html><body>relay</body></html>"
    );
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_index_missing_file_is_server_error() {
    // テスト項目: HTML ファイルが読めなければ 500 を返す
    // given (前提条件):
    let server = TestServer::start_with(ServerConfig {
        html_path: "/nonexistent/kotozute/home.html".into(),
        ..ServerConfig::default()
    })
    .await;

    // when (操作):
    let response = reqwest::get(server.base_url())
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn test_plain_get_on_ws_is_rejected() {
    // テスト項目: アップグレードでない /ws へのリクエストは拒否され、サーバーは動き続ける
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(format!("{}/ws?id=alice", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert!(response.status().is_client_error());
    let health = reqwest::get(format!("{}/api/health", server.base_url()))
        .await
        .expect("Failed to send request");
    assert_eq!(health.status(), 200);
}
