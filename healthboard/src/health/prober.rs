//! エンドポイントヘルスプローバー
//!
//! 全エンドポイントへ並列にGETを送り、HTTPステータスを信号機ステータスへ分類する。
//!
//! ## 分類ポリシー（優先順）
//!
//! - HTTP 200 → Healthy（緑）
//! - HTTP 503 → Degraded（黄）
//! - その他のHTTPステータス → Unreachable（赤）
//! - ネットワーク障害（タイムアウト・接続失敗・DNS） → Degraded（黄）
//!
//! ネットワーク障害はHTTPエラーより弱いシグナルとして扱う（一時的な瞬断で赤を出さない）。

use crate::auth::Credential;
use crate::common::error::ProbeError;
use crate::registry::EndpointRegistry;
use crate::types::endpoint::Endpoint;
use crate::types::snapshot::Snapshot;
use crate::types::status::HealthStatus;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// ヘルスチェックのタイムアウト（秒）
const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// サイクル締め切りの猶予（リクエストタイムアウトに加算）
const CYCLE_DEADLINE_GRACE: Duration = Duration::from_secs(1);

/// 1エンドポイント分のプローブ結果を分類する
///
/// HTTPステータスまたはネットワークエラーのみに依存する純粋関数。
pub fn classify(outcome: &Result<StatusCode, ProbeError>) -> HealthStatus {
    match outcome {
        Ok(StatusCode::OK) => HealthStatus::Healthy,
        Ok(StatusCode::SERVICE_UNAVAILABLE) => HealthStatus::Degraded,
        Ok(_) => HealthStatus::Unreachable,
        Err(_) => HealthStatus::Degraded,
    }
}

/// エンドポイントヘルスプローバー
///
/// 1サイクルで全エンドポイントを並列に1回ずつ確認する。リトライはしない
/// （次のスケジュールサイクルが再試行となる）。
#[derive(Clone)]
pub struct HealthProber {
    /// HTTPクライアント
    client: Client,
    /// 1リクエストあたりのタイムアウト
    request_timeout: Duration,
}

impl HealthProber {
    /// 新しいプローバーを作成
    pub fn new(client: Client) -> Self {
        Self {
            client,
            request_timeout: Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS),
        }
    }

    /// リクエストタイムアウトを設定
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// サイクル全体の締め切り（これを超えて未完了のプローブはDegraded）
    pub fn cycle_deadline(&self) -> Duration {
        self.request_timeout + CYCLE_DEADLINE_GRACE
    }

    /// 全エンドポイントを並列チェックしてスナップショットを生成
    ///
    /// 全結果が揃ってからスナップショットを組み立てるため、部分的な結果は外部に出ない。
    /// 戻り値は登録順に1エンドポイント1エントリ。
    pub async fn probe_all(
        &self,
        credential: Option<&Credential>,
        registry: &EndpointRegistry,
    ) -> Snapshot {
        if registry.is_empty() {
            info!("No endpoints to probe");
            return Snapshot::new(Vec::new());
        }

        if credential.is_none() {
            warn!("No access token available, probing without authorization");
        }

        let start = Instant::now();
        let deadline = self.cycle_deadline();
        let mut handles = Vec::with_capacity(registry.len());

        for endpoint in registry.iter() {
            let prober = self.clone();
            let endpoint = endpoint.clone();
            let credential = credential.cloned();
            handles.push(tokio::spawn(async move {
                tokio::time::timeout(
                    deadline,
                    prober.probe_endpoint(&endpoint, credential.as_ref()),
                )
                .await
                .unwrap_or(Err(ProbeError::Deadline))
            }));
        }

        let joined = futures::future::join_all(handles).await;
        let mut entries = Vec::with_capacity(joined.len());
        for (result, endpoint) in joined.into_iter().zip(registry.iter()) {
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(endpoint = %endpoint.name, "Probe task join error: {}", e);
                    Err(ProbeError::Request(e.to_string()))
                }
            };
            let status = classify(&outcome);
            log_outcome(endpoint, &outcome, status);
            entries.push((endpoint.name.clone(), status));
        }

        let snapshot = Snapshot::new(entries);
        info!(
            healthy = snapshot.count(HealthStatus::Healthy),
            degraded = snapshot.count(HealthStatus::Degraded),
            unreachable = snapshot.count(HealthStatus::Unreachable),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Probe cycle completed"
        );
        snapshot
    }

    /// 単一エンドポイントのヘルスチェック
    ///
    /// レスポンスボディは参照せず、ステータスコードのみを返す。
    pub async fn probe_endpoint(
        &self,
        endpoint: &Endpoint,
        credential: Option<&Credential>,
    ) -> Result<StatusCode, ProbeError> {
        debug!(endpoint = %endpoint, "Sending health check");
        let mut request = self.client.get(&endpoint.url).timeout(self.request_timeout);
        if let Some(credential) = credential {
            request = request.header(reqwest::header::AUTHORIZATION, credential.bearer());
        }

        let response = request.send().await?;
        Ok(response.status())
    }
}

fn log_outcome(endpoint: &Endpoint, outcome: &Result<StatusCode, ProbeError>, status: HealthStatus) {
    match (outcome, status) {
        (Ok(code), HealthStatus::Healthy) => {
            debug!(
                endpoint = %endpoint.name,
                code = code.as_u16(),
                status = %status,
                "Health check succeeded"
            );
        }
        (Ok(code), _) => {
            warn!(
                endpoint = %endpoint.name,
                code = code.as_u16(),
                status = %status,
                "Health check returned non-OK status"
            );
        }
        (Err(e), _) => {
            warn!(
                endpoint = %endpoint.name,
                error = %e,
                status = %status,
                "Health check failed"
            );
        }
    }
}
