//! PRTG カスタムセンサー用 XML
//!
//! 1エンドポイント1チャネル。値は Healthy=0 / Degraded=1 / Unreachable=2。

use super::escape_markup;
use crate::types::snapshot::Snapshot;

/// PRTG が取り込む XML 文書を生成する
///
/// チャネルは登録順。スナップショットが空でも `<prtg>` 文書として有効。
pub fn prtg_xml(snapshot: &Snapshot) -> String {
    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        "<prtg>".to_string(),
    ];
    for (name, status) in snapshot.iter() {
        lines.push("  <result>".to_string());
        lines.push(format!("    <channel>{}</channel>", escape_markup(name)));
        lines.push(format!("    <value>{}</value>", status.prtg_value()));
        lines.push("    <unit>Custom</unit>".to_string());
        lines.push("  </result>".to_string());
    }
    lines.push("<text>All services checked</text>".to_string());
    lines.push("</prtg>".to_string());
    lines.join("\n")
}
