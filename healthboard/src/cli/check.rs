//! check サブコマンド
//!
//! ログインと1回分のプローブを実行し、フィードを標準出力に書き出します。
//! サーバーもタイマーも起動しません。

use crate::common::error::BoardError;
use crate::feed;
use crate::scheduler::Scheduler;
use clap::{Args, ValueEnum};

/// 出力フォーマット
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFormat {
    /// `/api/status` と同じ JSON
    #[default]
    Json,
    /// `/api/status.xml` と同じ PRTG XML
    Xml,
}

/// check サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = FeedFormat::Json)]
    pub format: FeedFormat,
}

/// 1サイクル実行してフィード文字列を返す
pub async fn execute(args: &CheckArgs, scheduler: &Scheduler) -> Result<String, BoardError> {
    let snapshot = scheduler.run_once().await;
    let output = match args.format {
        FeedFormat::Json => feed::status_json(&snapshot).map_err(std::io::Error::from)?,
        FeedFormat::Xml => feed::prtg_xml(&snapshot),
    };
    Ok(output)
}
