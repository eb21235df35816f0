//! エンドポイント型定義

use serde::{Deserialize, Serialize};

/// 監視対象のヘルスチェックエンドポイント
///
/// 論理名とURLの組。レジストリ構築後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// 論理サービス名（フィードのチャネル名）
    pub name: String,
    /// ヘルスチェックURL
    pub url: String,
}

impl Endpoint {
    /// 新しいエンドポイントを作成
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}
