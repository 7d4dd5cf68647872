//! Board request handlers. All of them read the latest published view.

use axum::{
    extract::State,
    response::Html,
    Json,
};
use serde::Serialize;

use crate::board::{render_page, BoardView};
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    /// Successful passes so far; 0 until the gateway first answers.
    pub passes: u64,
    pub entries: usize,
    pub reconciled_at: Option<u64>,
}

pub async fn get_health(State(state): State<AppState>) -> Json<SystemStatus> {
    let view = state.board.load();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
        passes: view.passes,
        entries: view.entries.len(),
        reconciled_at: view.reconciled_at,
    })
}

pub async fn get_page(State(state): State<AppState>) -> Html<String> {
    let view = state.board.load();
    Html(render_page(&view, state.refresh_secs))
}

pub async fn get_board(State(state): State<AppState>) -> Json<BoardView> {
    let view = state.board.load_full();
    Json(BoardView::clone(&view))
}
