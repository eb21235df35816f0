//! Service health dashboard
//!
//! 認証付きAPIゲートウェイ配下のサービス群を定期的にポーリングし、
//! 信号機ステータスとしてHTML・JSON・PRTG XMLで公開する。

#![warn(missing_docs)]

/// 共通エラー型
pub mod common;

/// REST APIハンドラー
pub mod api;

/// ゲートウェイ認証（アクセストークン管理）
pub mod auth;

/// サーバー初期化
pub mod bootstrap;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// スナップショットの外部表現（JSON・PRTG XML・HTML）
pub mod feed;

/// ヘルスプローブとステータスストア
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// Prometheus メトリクス
pub mod metrics;

/// 監視対象エンドポイントの登録
pub mod registry;

/// バックグラウンドジョブのスケジューラ
pub mod scheduler;

/// HTTPサーバー起動
pub mod server;

/// Cooperative shutdown controller
pub mod shutdown;

/// 型定義
pub mod types;

/// アプリケーション状態
///
/// ハンドラーはここにあるインメモリ状態だけを読み、上流へは一切リクエストしない。
#[derive(Clone)]
pub struct AppState {
    /// 最新スナップショット
    pub store: health::StatusStore,
    /// メトリクスレジストリ
    pub metrics: metrics::SharedMetrics,
    /// Cooperative shutdown controller
    pub shutdown: shutdown::ShutdownController,
}
