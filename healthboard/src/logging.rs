//! ロギング初期化
//!
//! `HEALTHBOARD_LOG_LEVEL`、未設定なら `RUST_LOG` から EnvFilter を組み立て、
//! tracing-subscriber の fmt レイヤーを標準エラーへ出力する。

use crate::common::error::BoardError;
use tracing_subscriber::EnvFilter;

/// 既定のログレベル
const DEFAULT_LOG_LEVEL: &str = "info";

/// フィルタ文字列を解決する
///
/// subscriber 初期化前に呼ばれるため、ここではログを出さない。
fn filter_directive() -> String {
    std::env::var("HEALTHBOARD_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

/// フィルタ文字列を検証して EnvFilter を作る
pub fn build_filter(directive: &str) -> Result<EnvFilter, BoardError> {
    EnvFilter::try_new(directive)
        .map_err(|e| BoardError::Logging(format!("invalid log level '{}': {}", directive, e)))
}

/// グローバルsubscriberを初期化する（プロセスで1回だけ呼ぶ）
pub fn init() -> Result<(), BoardError> {
    let filter = build_filter(&filter_directive())?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| BoardError::Logging(format!("failed to set subscriber: {}", e)))
}
