use std::time::Duration;

use healthboard::bootstrap::{self, InitContext};
use healthboard::config::{BoardConfig, Credentials, GatewayConfig, ScheduleConfig};
use healthboard::registry::EndpointRegistry;
use healthboard::scheduler::Scheduler;
use healthboard::types::Endpoint;
use healthboard::{api, AppState};
use serde_json::json;
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::http::{spawn_router, TestServer};

pub const LOGIN_PATH: &str = "/authservice/v1/login";
pub const REFRESH_PATH: &str = "/authservice/v1/refresh-token";

/// ログインが常に `token` を返すようにする
pub async fn mount_login(gateway: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": token })))
        .mount(gateway)
        .await;
}

/// 指定パスのヘルスエンドポイントが `status` を返すようにする
pub async fn mount_health(gateway: &MockServer, health_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(health_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(gateway)
        .await;
}

/// 短い間隔のスケジュール（テスト用）
pub fn fast_schedule() -> ScheduleConfig {
    ScheduleConfig {
        probe_interval: Duration::from_millis(100),
        refresh_interval: Duration::from_millis(250),
        request_timeout: Duration::from_millis(300),
        startup_delay: Duration::from_millis(10),
    }
}

/// モックゲートウェイを向いた設定を作る
///
/// `endpoints` は `(name, path)` の組で、URLはゲートウェイ相対。
pub fn board_config(
    gateway: &MockServer,
    endpoints: &[(&str, &str)],
    schedule: ScheduleConfig,
) -> BoardConfig {
    let registry = EndpointRegistry::new(
        endpoints
            .iter()
            .map(|(name, p)| Endpoint::new(*name, format!("{}{}", gateway.uri(), p)))
            .collect(),
    )
    .unwrap();
    BoardConfig {
        credentials: Credentials::new("monitor@example.com", "test-secret"),
        gateway: GatewayConfig::from_base_url(&gateway.uri()),
        schedule,
        registry,
    }
}

/// 起動済みのダッシュボード
#[allow(dead_code)]
pub struct RunningBoard {
    pub server: TestServer,
    pub state: AppState,
    pub jobs: JoinHandle<()>,
}

#[allow(dead_code)]
impl RunningBoard {
    /// 最初のスナップショットが公開されるまで待つ
    pub async fn wait_until_ready(&self) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !self.state.store.has_snapshot().await {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        })
        .await
        .expect("board never published a snapshot");
    }

    /// ジョブとサーバーを停止する
    pub async fn stop(self) {
        self.state.shutdown.request_shutdown();
        let _ = tokio::time::timeout(Duration::from_secs(5), self.jobs).await;
        self.server.stop().await;
    }
}

/// スケジューラとHTTPサーバーを起動する
#[allow(dead_code)]
pub async fn spawn_board(config: BoardConfig) -> RunningBoard {
    let InitContext { state, scheduler } = bootstrap::initialize(config).unwrap();
    let jobs = scheduler.start(state.shutdown.clone());
    let server = spawn_router(api::create_app(state.clone())).await;
    RunningBoard {
        server,
        state,
        jobs,
    }
}

/// タイマーを起動せずにスケジューラだけを作る
#[allow(dead_code)]
pub fn scheduler_only(config: BoardConfig) -> (Scheduler, AppState) {
    let InitContext { state, scheduler } = bootstrap::initialize(config).unwrap();
    (scheduler, state)
}
