//! エンドポイントレジストリ
//!
//! 論理サービス名 → ヘルスチェックURL の静的な対応表。
//! 構築後は不変で、挿入順（フィード出力順）を保持する。

use crate::common::error::ConfigError;
use crate::types::endpoint::Endpoint;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// 組み込みレジストリ（ゲートウェイ相対パス）
const BUILTIN_ENDPOINTS: &[(&str, &str)] = &[
    ("authservice", "/authservice/health"),
    ("accountservice", "/accountservice/health"),
    ("billingservice", "/billingservice/health"),
    ("customerservice", "/customerservice/health"),
    ("claims", "/v1/claims/health"),
    ("documentservice", "/documentservice/health"),
    ("insuranceservice", "/insuranceservice/health"),
    ("paymentservice", "/paymentservice/health"),
    ("processmanager", "/processmanager/health"),
    ("translationsvc", "/translationservice/health"),
    ("partnerservice", "/partnerservice/health"),
    ("policyadmin", "/policy-administration-service/health"),
    ("numbergenerator", "/numbergenerator/health"),
];

/// 監視対象エンドポイントの不変レジストリ
///
/// Clone は `Arc` の複製のみ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    endpoints: Arc<[Endpoint]>,
}

impl EndpointRegistry {
    /// エンドポイント一覧からレジストリを作成
    ///
    /// 名前の重複、空の名前・URLは設定エラーとして拒否する。
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(endpoints.len());
        for endpoint in &endpoints {
            if endpoint.name.trim().is_empty() {
                return Err(ConfigError::Registry("endpoint name is empty".to_string()));
            }
            if endpoint.url.trim().is_empty() {
                return Err(ConfigError::Registry(format!(
                    "endpoint '{}' has an empty url",
                    endpoint.name
                )));
            }
            if !seen.insert(endpoint.name.as_str()) {
                return Err(ConfigError::Registry(format!(
                    "duplicate endpoint name '{}'",
                    endpoint.name
                )));
            }
        }
        Ok(Self {
            endpoints: endpoints.into(),
        })
    }

    /// ゲートウェイ配下の組み込みサービス一覧
    pub fn builtin(gateway_base_url: &str) -> Self {
        let base = gateway_base_url.trim_end_matches('/');
        let endpoints: Vec<Endpoint> = BUILTIN_ENDPOINTS
            .iter()
            .map(|(name, path)| Endpoint::new(*name, format!("{}{}", base, path)))
            .collect();
        Self {
            endpoints: endpoints.into(),
        }
    }

    /// YAMLファイル（`{name, url}` のリスト）から読み込む
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let endpoints: Vec<Endpoint> = serde_yaml::from_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            count = endpoints.len(),
            "Loaded endpoint registry from file"
        );
        Self::new(endpoints)
    }

    /// 登録順のイテレータ
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    /// 登録数
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
