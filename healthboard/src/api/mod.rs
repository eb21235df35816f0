//! REST APIハンドラー
//!
//! ダッシュボード・ステータスフィード・プロセス監視用エンドポイントのルーティング。

pub mod status;
pub mod system;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(status::dashboard))
        .route("/api/status", get(status::status_json))
        .route("/api/status.xml", get(status::status_xml))
        .route("/metrics", get(system::metrics))
        .route("/healthz", get(system::healthz))
        .route("/readyz", get(system::readyz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
