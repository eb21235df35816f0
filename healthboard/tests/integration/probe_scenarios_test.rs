//! Integration Test: 1サイクル分のプローブ結果
//!
//! ログイン成功後、各ヘルスエンドポイントの応答がスナップショットとフィードに
//! どう反映されるかを検証する。

use std::time::Duration;

use healthboard::config::ScheduleConfig;
use healthboard::feed;
use healthboard::types::HealthStatus;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::board::{board_config, mount_health, mount_login, scheduler_only};

#[tokio::test]
async fn ok_response_is_green() {
    let gateway = MockServer::start().await;
    mount_login(&gateway, "tok-1").await;
    Mock::given(method("GET"))
        .and(path("/svc1/health"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&gateway)
        .await;

    let config = board_config(&gateway, &[("svc1", "/svc1/health")], ScheduleConfig::default());
    let (scheduler, state) = scheduler_only(config);
    scheduler.run_once().await;

    let snapshot = state.store.current().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get("svc1"), Some(HealthStatus::Healthy));
    assert_eq!(
        serde_json::to_value(snapshot.as_ref()).unwrap(),
        serde_json::json!({"svc1": "green"})
    );
}

#[tokio::test]
async fn service_unavailable_is_yellow() {
    let gateway = MockServer::start().await;
    mount_login(&gateway, "tok").await;
    mount_health(&gateway, "/svc1/health", 503).await;

    let config = board_config(&gateway, &[("svc1", "/svc1/health")], ScheduleConfig::default());
    let (scheduler, state) = scheduler_only(config);
    scheduler.run_once().await;

    assert_eq!(
        state.store.current().await.get("svc1"),
        Some(HealthStatus::Degraded)
    );
}

#[tokio::test]
async fn timeout_is_yellow() {
    let gateway = MockServer::start().await;
    mount_login(&gateway, "tok").await;
    Mock::given(method("GET"))
        .and(path("/svc1/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&gateway)
        .await;

    let schedule = ScheduleConfig {
        request_timeout: Duration::from_millis(200),
        ..ScheduleConfig::default()
    };
    let config = board_config(&gateway, &[("svc1", "/svc1/health")], schedule);
    let (scheduler, state) = scheduler_only(config);
    scheduler.run_once().await;

    assert_eq!(
        state.store.current().await.get("svc1"),
        Some(HealthStatus::Degraded)
    );
}

#[tokio::test]
async fn not_found_is_red() {
    let gateway = MockServer::start().await;
    mount_login(&gateway, "tok").await;
    mount_health(&gateway, "/svc1/health", 404).await;

    let config = board_config(&gateway, &[("svc1", "/svc1/health")], ScheduleConfig::default());
    let (scheduler, state) = scheduler_only(config);
    scheduler.run_once().await;

    assert_eq!(
        state.store.current().await.get("svc1"),
        Some(HealthStatus::Unreachable)
    );
}

#[tokio::test]
async fn mixed_results_render_prtg_values_in_order() {
    let gateway = MockServer::start().await;
    mount_login(&gateway, "tok").await;
    mount_health(&gateway, "/svc1/health", 200).await;
    mount_health(&gateway, "/svc2/health", 500).await;

    let config = board_config(
        &gateway,
        &[("svc1", "/svc1/health"), ("svc2", "/svc2/health")],
        ScheduleConfig::default(),
    );
    let (scheduler, state) = scheduler_only(config);
    scheduler.run_once().await;

    let xml = feed::prtg_xml(&*state.store.current().await);
    assert_eq!(xml.matches("<result>").count(), 2);

    let svc1 = xml.find("<channel>svc1</channel>").unwrap();
    let svc2 = xml.find("<channel>svc2</channel>").unwrap();
    let ok = xml.find("<value>0</value>").unwrap();
    let error = xml.find("<value>2</value>").unwrap();
    assert!(svc1 < ok && ok < svc2 && svc2 < error);
}

#[tokio::test]
async fn snapshot_covers_every_endpoint_even_when_all_fail() {
    let gateway = MockServer::start().await;
    mount_login(&gateway, "tok").await;
    mount_health(&gateway, "/a/health", 401).await;
    mount_health(&gateway, "/b/health", 503).await;

    let config = board_config(
        &gateway,
        &[
            ("a", "/a/health"),
            ("b", "/b/health"),
            ("c", "/not-mounted/health"),
        ],
        ScheduleConfig::default(),
    );
    let (scheduler, state) = scheduler_only(config);
    scheduler.run_once().await;

    let snapshot = state.store.current().await;
    let names: Vec<&str> = snapshot.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(snapshot.get("a"), Some(HealthStatus::Unreachable));
    assert_eq!(snapshot.get("b"), Some(HealthStatus::Degraded));
    // wiremock answers unmatched requests with 404
    assert_eq!(snapshot.get("c"), Some(HealthStatus::Unreachable));
}
