//! Integration Test: アクセストークンのライフサイクル
//!
//! 起動時ログイン、定期リフレッシュ、失敗時の旧トークン維持を検証する。

use std::time::Duration;

use healthboard::types::HealthStatus;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::board::{
    board_config, fast_schedule, mount_health, mount_login, scheduler_only, spawn_board,
    LOGIN_PATH, REFRESH_PATH,
};

#[tokio::test]
async fn login_sends_configured_credentials() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(json!({
            "username": "monitor@example.com",
            "password": "test-secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok"})))
        .expect(1)
        .mount(&gateway)
        .await;
    mount_health(&gateway, "/svc/health", 200).await;

    let config = board_config(&gateway, &[("svc", "/svc/health")], fast_schedule());
    let (scheduler, state) = scheduler_only(config);
    scheduler.run_once().await;

    assert_eq!(
        state.store.current().await.get("svc"),
        Some(HealthStatus::Healthy)
    );
}

#[tokio::test]
async fn refreshed_token_is_used_by_later_probes() {
    let gateway = MockServer::start().await;
    mount_login(&gateway, "first").await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .and(body_json(json!({"username": "monitor@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "second"})))
        .mount(&gateway)
        .await;
    Mock::given(method("GET"))
        .and(path("/svc/health"))
        .and(header("authorization", "Bearer second"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&gateway)
        .await;
    Mock::given(method("GET"))
        .and(path("/svc/health"))
        .and(header("authorization", "Bearer first"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&gateway)
        .await;

    let board = spawn_board(board_config(&gateway, &[("svc", "/svc/health")], fast_schedule())).await;
    board.wait_until_ready().await;

    tokio::time::timeout(Duration::from_secs(5), async {
        while board.state.store.current().await.get("svc") != Some(HealthStatus::Healthy) {
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    })
    .await
    .expect("probes never picked up the refreshed token");

    board.stop().await;
}

#[tokio::test]
async fn failed_refresh_keeps_previous_token() {
    let gateway = MockServer::start().await;
    mount_login(&gateway, "first").await;
    Mock::given(method("POST"))
        .and(path(REFRESH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&gateway)
        .await;
    Mock::given(method("GET"))
        .and(path("/svc/health"))
        .and(header("authorization", "Bearer first"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&gateway)
        .await;

    let board = spawn_board(board_config(&gateway, &[("svc", "/svc/health")], fast_schedule())).await;
    board.wait_until_ready().await;

    // let at least two refresh attempts fail
    tokio::time::sleep(Duration::from_millis(800)).await;

    let refreshes = gateway
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == REFRESH_PATH)
        .count();
    assert!(refreshes >= 2, "expected refresh attempts, got {}", refreshes);
    assert_eq!(
        board.state.store.current().await.get("svc"),
        Some(HealthStatus::Healthy)
    );

    board.stop().await;
}

#[tokio::test]
async fn failed_login_still_publishes_statuses() {
    let gateway = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&gateway)
        .await;
    mount_health(&gateway, "/svc/health", 401).await;

    let config = board_config(&gateway, &[("svc", "/svc/health")], fast_schedule());
    let (scheduler, state) = scheduler_only(config);
    scheduler.run_once().await;

    assert_eq!(
        state.store.current().await.get("svc"),
        Some(HealthStatus::Unreachable)
    );
    let probe = gateway
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.url.path() == "/svc/health")
        .expect("probe was not sent");
    assert!(probe.headers.get("authorization").is_none());
}
