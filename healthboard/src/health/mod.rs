//! ヘルスチェック
//!
//! 定期的にエンドポイントの稼働状況を確認し、最新のスナップショットを保持する。
//!
//! - `prober`: 全エンドポイントの並列プローブと信号機ステータスへの分類
//! - `store`: 最新スナップショットのアトミックな差し替え・読み出し

pub mod prober;
pub mod store;

pub use prober::{classify, HealthProber};
pub use store::StatusStore;
