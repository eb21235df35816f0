//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! - `AuthError`: ログイン/トークン更新の失敗（致命的ではない）
//! - `ProbeError`: 個別ヘルスチェックの失敗（ステータスに変換される）
//! - `ConfigError`: 起動時の設定不備（致命的）

use reqwest::StatusCode;
use thiserror::Error;

/// Login or token refresh failure.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request did not complete within the timeout
    #[error("authentication request timed out")]
    Timeout,

    /// The gateway could not be reached
    #[error("connection to auth endpoint failed: {0}")]
    Connect(String),

    /// Any other transport-level failure
    #[error("auth request failed: {0}")]
    Request(String),

    /// Non-2xx response
    #[error("auth endpoint returned HTTP {0}")]
    Status(StatusCode),

    /// Body could not be decoded as the expected JSON
    #[error("malformed auth response: {0}")]
    MalformedBody(String),

    /// 2xx response without a usable `accessToken`
    #[error("auth response did not contain an access token")]
    MissingToken,
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_decode() {
            Self::MalformedBody(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Network-level failure of a single health probe.
///
/// Never leaves the prober: every variant is classified into a status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The request timed out
    #[error("request timed out")]
    Timeout,

    /// Connection refused, DNS failure and similar
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport-level failure
    #[error("request failed: {0}")]
    Request(String),

    /// Still outstanding when the cycle deadline fired
    #[error("probe cycle deadline exceeded")]
    Deadline,
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Startup configuration error. Fatal: the service does not start serving.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set (or empty)
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    /// A variable is set but unusable
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Endpoint registry is inconsistent
    #[error("endpoint registry error: {0}")]
    Registry(String),

    /// Endpoints file could not be read
    #[error("failed to read endpoints file: {0}")]
    Io(#[from] std::io::Error),

    /// Endpoints file could not be parsed
    #[error("failed to parse endpoints file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Top-level error of the healthboard process
#[derive(Debug, Error)]
pub enum BoardError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Socket bind or serve failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metrics registry error
    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Log filter or subscriber setup failed
    #[error("logging error: {0}")]
    Logging(String),
}
