//! ステータス表示ハンドラー
//!
//! `/`・`/api/status`・`/api/status.xml` を提供する。いずれも最新スナップショットを
//! 読むだけで、上流への問い合わせは行わない。

use crate::feed;
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};

/// GET / - HTMLダッシュボード
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.store.current().await;
    Html(feed::render_dashboard(&snapshot))
}

/// GET /api/status - 登録順の `name -> colour` JSON
pub async fn status_json(State(state): State<AppState>) -> Response {
    let snapshot = state.store.current().await;
    Json(snapshot.as_ref()).into_response()
}

/// GET /api/status.xml - PRTG XML
pub async fn status_xml(State(state): State<AppState>) -> Response {
    let snapshot = state.store.current().await;
    (
        [(header::CONTENT_TYPE, "application/xml")],
        feed::prtg_xml(&snapshot),
    )
        .into_response()
}
