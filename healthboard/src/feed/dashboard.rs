//! HTML dashboard page
//!
//! A single self-contained page: one row per endpoint with a coloured dot,
//! refreshed by the browser every 30 seconds.

use super::escape_markup;
use crate::types::snapshot::Snapshot;
use crate::types::status::HealthStatus;
use std::fmt::Write;

/// Browser refresh interval for the page
const REFRESH_SECS: u32 = 30;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;background:#fafafa}\
table{border-collapse:collapse;min-width:24rem}\
td,th{padding:.4rem .8rem;border-bottom:1px solid #ddd;text-align:left}\
.dot{display:inline-block;width:1rem;height:1rem;border-radius:50%}\
.green{background:#2e7d32}.yellow{background:#f9a825}.red{background:#c62828}\
.meta{color:#666;font-size:.9rem}";

/// Render the dashboard for a snapshot
pub fn render_dashboard(snapshot: &Snapshot) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(
        html,
        "<meta http-equiv=\"refresh\" content=\"{}\">",
        REFRESH_SECS
    );
    html.push_str("<title>Service Health</title>\n");
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n<h1>Service Health</h1>\n");

    match snapshot.checked_at() {
        Some(checked_at) => {
            let _ = writeln!(
                html,
                "<p class=\"meta\">Last check: {} &middot; {} healthy, {} degraded, {} unreachable</p>",
                checked_at.format("%Y-%m-%d %H:%M:%S UTC"),
                snapshot.count(HealthStatus::Healthy),
                snapshot.count(HealthStatus::Degraded),
                snapshot.count(HealthStatus::Unreachable),
            );
        }
        None => html.push_str("<p class=\"meta\">Waiting for the first check&hellip;</p>\n"),
    }

    html.push_str("<table>\n<tr><th>Status</th><th>Service</th><th></th></tr>\n");
    for (name, status) in snapshot.iter() {
        let _ = writeln!(
            html,
            "<tr><td><span class=\"dot {colour}\" title=\"{colour}\"></span></td><td>{name}</td><td>{label}</td></tr>",
            colour = status.as_str(),
            name = escape_markup(name),
            label = status.label(),
        );
    }
    html.push_str("</table>\n</body>\n</html>\n");
    html
}
