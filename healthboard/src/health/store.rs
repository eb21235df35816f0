//! ステータスストア
//!
//! 最新スナップショットを1つだけ保持する。書き込みは `Arc` の丸ごと差し替えのみで、
//! 読み手は常に旧スナップショットか新スナップショットのどちらか完全な方を受け取る。

use crate::types::snapshot::Snapshot;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 最新スナップショットの保持領域
///
/// Clone は同じ保持領域を共有する。
#[derive(Clone)]
pub struct StatusStore {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl StatusStore {
    /// 空のスナップショットで初期化
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(Snapshot::empty()))),
        }
    }

    /// スナップショットを丸ごと置き換える
    ///
    /// ロックはポインタ差し替えの間だけ保持する。
    pub async fn replace(&self, snapshot: impl Into<Arc<Snapshot>>) {
        let snapshot = snapshot.into();
        *self.inner.write().await = snapshot;
    }

    /// 現在のスナップショット（初回サイクル完了前は空）
    pub async fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.inner.read().await)
    }

    /// 1度でもサイクル結果が公開されたか
    pub async fn has_snapshot(&self) -> bool {
        self.inner.read().await.checked_at().is_some()
    }
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}
