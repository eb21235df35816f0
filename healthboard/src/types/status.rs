//! 信号機ステータス型定義

use serde::{Deserialize, Serialize};

/// エンドポイントの健康状態（信号機表示）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    /// 正常（緑）
    #[serde(rename = "green")]
    Healthy,
    /// 劣化・一時的な障害（黄）
    #[serde(rename = "yellow")]
    Degraded,
    /// 到達不能・HTTPエラー（赤）
    #[serde(rename = "red")]
    Unreachable,
}

impl HealthStatus {
    /// Traffic-light colour used on the wire and in the dashboard
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "green",
            Self::Degraded => "yellow",
            Self::Unreachable => "red",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Degraded => "Degraded",
            Self::Unreachable => "Unreachable",
        }
    }

    /// PRTG channel value (0 = ok, 1 = warning, 2 = error)
    pub fn prtg_value(&self) -> u8 {
        match self {
            Self::Healthy => 0,
            Self::Degraded => 1,
            Self::Unreachable => 2,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
