//! フィード生成
//!
//! スナップショットを外部向けの表現（JSON・PRTG XML・HTMLダッシュボード）に変換する。
//! どの関数も純粋で、ストアやネットワークには触れない。

pub mod dashboard;
pub mod prtg;

pub use dashboard::render_dashboard;
pub use prtg::prtg_xml;

use crate::types::snapshot::Snapshot;

/// `/api/status` と同じ JSON 表現（登録順の `name -> colour` オブジェクト）
pub fn status_json(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}

/// XML/HTML のテキスト・属性値として安全な形にエスケープする
pub(crate) fn escape_markup(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
