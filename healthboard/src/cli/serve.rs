//! serve サブコマンド
//!
//! スケジューラとダッシュボードサーバーを起動します。

use clap::{Args, Parser};

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "5000", env = "HEALTHBOARD_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "HEALTHBOARD_HOST")]
    pub host: String,
}

/// サブコマンド省略時に `ServeArgs` を組み立てるためのパーサー
#[derive(Parser, Debug)]
#[command(name = "healthboard")]
struct DefaultServe {
    #[command(flatten)]
    args: ServeArgs,
}

impl ServeArgs {
    /// サブコマンド省略時の引数（環境変数と既定値のみ）
    ///
    /// `serve` と同じ clap 定義で検証するため、不正な `HEALTHBOARD_PORT` はエラーになる。
    pub fn from_env() -> Result<Self, clap::Error> {
        DefaultServe::try_parse_from(["healthboard"]).map(|parsed| parsed.args)
    }

    /// `host:port` 形式のバインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
