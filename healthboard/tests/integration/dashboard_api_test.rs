//! Integration Test: 実ポートでのダッシュボードAPI
//!
//! スケジューラとHTTPサーバーを起動し、外部クライアントから各ルートを確認する。

use reqwest::{header, Client, StatusCode};
use serde_json::{json, Value};
use wiremock::MockServer;

use crate::support::board::{board_config, fast_schedule, mount_health, mount_login, spawn_board};

#[tokio::test]
async fn routes_serve_latest_snapshot() {
    let gateway = MockServer::start().await;
    mount_login(&gateway, "tok").await;
    mount_health(&gateway, "/auth/health", 200).await;
    mount_health(&gateway, "/billing/health", 503).await;
    mount_health(&gateway, "/claims/health", 500).await;

    let board = spawn_board(board_config(
        &gateway,
        &[
            ("authservice", "/auth/health"),
            ("billingservice", "/billing/health"),
            ("claims", "/claims/health"),
        ],
        fast_schedule(),
    ))
    .await;
    board.wait_until_ready().await;
    let client = Client::new();

    let res = client.get(board.server.url("/api/status")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"authservice": "green", "billingservice": "yellow", "claims": "red"})
    );

    let res = client
        .get(board.server.url("/api/status.xml"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/xml"
    );
    let xml = res.text().await.unwrap();
    assert!(xml.contains("<channel>billingservice</channel>\n    <value>1</value>"));

    let res = client.get(board.server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("authservice"));
    assert!(html.contains("http-equiv=\"refresh\""));

    let res = client.get(board.server.url("/readyz")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let metrics = client
        .get(board.server.url("/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(metrics.contains("healthboard_auth_attempts_total"));
    assert!(metrics.contains("healthboard_endpoint_status{endpoint=\"claims\"} 2"));

    board.stop().await;
}

#[tokio::test]
async fn requests_do_not_reach_upstream() {
    let gateway = MockServer::start().await;
    mount_login(&gateway, "tok").await;
    mount_health(&gateway, "/svc/health", 200).await;

    let board = spawn_board(board_config(&gateway, &[("svc", "/svc/health")], fast_schedule())).await;
    board.wait_until_ready().await;

    // stop the timers so upstream traffic can only come from handlers
    board.state.shutdown.request_shutdown();
    tokio::time::sleep(std::time::Duration::from_millis(400)).await;
    let before = gateway.received_requests().await.unwrap().len();

    let client = Client::new();
    for route in ["/", "/api/status", "/api/status.xml"] {
        let res = client.get(board.server.url(route)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    assert_eq!(gateway.received_requests().await.unwrap().len(), before);
    board.stop().await;
}
