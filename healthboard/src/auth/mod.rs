//! Credential lifecycle
//!
//! Owns the gateway access token: initial login, periodic refresh and a
//! non-blocking read of the current value. A failed call never clears a token
//! that is already held.

use crate::common::error::AuthError;
use crate::config::{Credentials, GatewayConfig};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Default bound on login/refresh requests
const AUTH_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Bearer token issued by the gateway.
///
/// Opaque and immutable; clones share the same allocation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Arc<str>);

impl Credential {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(Arc::from(token.into()))
    }

    /// Raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.as_str())
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Login/refresh response body
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

/// Which upstream call produced a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    /// Username/password login
    Login,
    /// Token refresh
    Refresh,
}

impl AuthOperation {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Refresh => "refresh",
        }
    }
}

/// Owns the current access token.
///
/// Single writer (the credential job), many readers (the probe job).
pub struct CredentialManager {
    client: Client,
    gateway: GatewayConfig,
    credentials: Credentials,
    request_timeout: Duration,
    token: RwLock<Option<Credential>>,
}

impl CredentialManager {
    /// Create a manager with no token yet
    pub fn new(client: Client, gateway: GatewayConfig, credentials: Credentials) -> Self {
        Self {
            client,
            gateway,
            credentials,
            request_timeout: Duration::from_secs(AUTH_REQUEST_TIMEOUT_SECS),
            token: RwLock::new(None),
        }
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Log in with username and password and store the new token.
    ///
    /// On failure the previous token (if any) stays in effect.
    pub async fn authenticate(&self) -> Result<Credential, AuthError> {
        let body = json!({
            "username": self.credentials.username,
            "password": self.credentials.password(),
        });
        let credential = self.request_token(&self.gateway.login_url, &body).await?;
        self.store(credential.clone()).await;
        info!(username = %self.credentials.username, "Access token obtained");
        Ok(credential)
    }

    /// Refresh the token and store the new one.
    ///
    /// Safe to call without a token; on failure state is left unchanged.
    pub async fn refresh(&self) -> Result<Credential, AuthError> {
        let body = json!({ "username": self.credentials.username });
        let credential = self.request_token(&self.gateway.refresh_url, &body).await?;
        self.store(credential.clone()).await;
        info!("Access token refreshed");
        Ok(credential)
    }

    /// Renewal step run by the scheduler.
    ///
    /// Refreshes while a token is held, otherwise logs in again so a failed
    /// startup login recovers on the next cycle.
    pub async fn renew(&self) -> (AuthOperation, Result<Credential, AuthError>) {
        if self.current().await.is_some() {
            (AuthOperation::Refresh, self.refresh().await)
        } else {
            (AuthOperation::Login, self.authenticate().await)
        }
    }

    /// Latest known token
    pub async fn current(&self) -> Option<Credential> {
        self.token.read().await.clone()
    }

    async fn store(&self, credential: Credential) {
        *self.token.write().await = Some(credential);
    }

    async fn request_token(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<Credential, AuthError> {
        debug!(url = %url, "Requesting access token");

        let response = self
            .client
            .post(url)
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Status(status));
        }

        let bytes = response.bytes().await?;
        let parsed: TokenResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::MalformedBody(e.to_string()))?;

        match parsed.access_token {
            Some(token) if !token.is_empty() => Ok(Credential::new(token)),
            _ => Err(AuthError::MissingToken),
        }
    }
}
