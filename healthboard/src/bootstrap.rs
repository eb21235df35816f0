//! サーバー初期化ロジック
//!
//! HTTPクライアント、認証マネージャー、プローバー、ストア、メトリクスを組み立て、
//! `AppState` とバックグラウンドスケジューラを返す。起動はしない。

use crate::auth::CredentialManager;
use crate::common::error::BoardError;
use crate::config::BoardConfig;
use crate::health::{HealthProber, StatusStore};
use crate::metrics::create_metrics;
use crate::scheduler::Scheduler;
use crate::shutdown::ShutdownController;
use crate::AppState;
use std::sync::Arc;
use tracing::info;

/// サーバー初期化結果
pub struct InitContext {
    /// アプリケーション状態（HTTPハンドラー用）
    pub state: AppState,
    /// バックグラウンドジョブ（未起動）
    pub scheduler: Scheduler,
}

/// 共有HTTPクライアントを作成する
///
/// リクエスト単位のタイムアウトは各呼び出し側で設定するため、ここでは
/// 接続確立のタイムアウトのみ設定する。
fn build_http_client(config: &BoardConfig) -> Result<reqwest::Client, BoardError> {
    let client = reqwest::Client::builder()
        .connect_timeout(config.schedule.request_timeout)
        .user_agent(concat!("healthboard/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// サーバー初期化を実行する
pub fn initialize(config: BoardConfig) -> Result<InitContext, BoardError> {
    info!("Healthboard v{}", env!("CARGO_PKG_VERSION"));
    info!(
        gateway = %config.gateway.base_url,
        endpoints = config.registry.len(),
        probe_interval_secs = config.schedule.probe_interval.as_secs(),
        refresh_interval_secs = config.schedule.refresh_interval.as_secs(),
        "Configuration loaded"
    );

    let http_client = build_http_client(&config)?;
    let metrics = create_metrics()?;
    let store = StatusStore::new();

    let credentials = Arc::new(
        CredentialManager::new(http_client.clone(), config.gateway, config.credentials)
            .with_timeout(config.schedule.request_timeout),
    );
    let prober = HealthProber::new(http_client).with_timeout(config.schedule.request_timeout);

    let scheduler = Scheduler::new(
        credentials,
        prober,
        config.registry,
        store.clone(),
        metrics.clone(),
        config.schedule,
    );

    let state = AppState {
        store,
        metrics,
        shutdown: ShutdownController::default(),
    };

    Ok(InitContext { state, scheduler })
}
