//! Read-only board projections.
//!
//! The poller publishes a fresh [`BoardView`] after every pass; HTTP handlers
//! and the one-shot CLI only ever see these snapshots of board state.

use std::fmt::Write;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::board::entry::{AggregateCounts, Indicator, RenderedEntry};
use crate::board::render::{escape, EntryRenderer};
use crate::fetch::types::{ApiDescriptor, ServiceHealth};

/// Board view shared between the poller (writer) and readers.
pub type SharedBoard = Arc<ArcSwap<BoardView>>;

/// Create an empty shared board.
pub fn shared_board() -> SharedBoard {
    Arc::new(ArcSwap::from_pointee(BoardView::default()))
}

/// Complete state of the board after one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardView {
    pub client_id: Option<String>,
    pub counts: AggregateCounts,
    /// Entries in creation order.
    pub entries: Vec<EntryView>,
    pub passes: u64,
    /// Unix seconds of the last successful pass.
    pub reconciled_at: Option<u64>,
}

/// One entry as seen by readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryView {
    pub name: String,
    pub status: ServiceHealth,
    pub indicator: Indicator,
    pub instances: u64,
    pub healthy: u64,
    pub unhealthy: u64,
    pub apis: Vec<ApiDescriptor>,
    #[serde(skip)]
    pub markup: String,
}

impl EntryView {
    pub fn from_entry(entry: &RenderedEntry, renderer: &dyn EntryRenderer) -> Self {
        Self {
            name: entry.name().to_string(),
            status: entry.status(),
            indicator: entry.indicator(),
            instances: entry.instances(),
            healthy: entry.healthy(),
            unhealthy: entry.unhealthy(),
            apis: entry.apis().to_vec(),
            markup: renderer.render_entry(entry),
        }
    }
}

/// Full HTML page for the board. The page reloads itself every
/// `refresh_secs` seconds.
pub fn render_page(view: &BoardView, refresh_secs: u64) -> String {
    let mut out = String::new();
    let client_id = view.client_id.as_deref().map(escape).unwrap_or_default();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<meta http-equiv=\"refresh\" content=\"{}\">", refresh_secs.max(1));
    out.push_str("<title>Revolver Dashboard</title>\n");
    out.push_str("<link rel=\"stylesheet\" href=\"https://fonts.googleapis.com/icon?family=Material+Icons\">\n");
    out.push_str("<link rel=\"stylesheet\" href=\"https://cdnjs.cloudflare.com/ajax/libs/materialize/0.97.8/css/materialize.min.css\">\n");
    out.push_str("</head>\n<body>\n<div id=\"revolver_dashboard_content\" class=\"container\">\n");

    let _ = writeln!(out, "<h5>Client: <span id=\"client_id_text\">{}</span></h5>", client_id);
    out.push_str("<div class=\"row\">\n");
    let _ = writeln!(out, "<span class=\"chip\">Services: <span id=\"total_service_count\">{}</span></span>", view.counts.total);
    let _ = writeln!(out, "<span class=\"chip\">Healthy: <span id=\"total_healthy_count\">{}</span></span>", view.counts.healthy);
    let _ = writeln!(out, "<span class=\"chip\">Unhealthy: <span id=\"total_unhealthy_count\">{}</span></span>", view.counts.unhealthy);
    let _ = writeln!(out, "<span class=\"chip\">Unknown: <span id=\"total_unknown_count\">{}</span></span>", view.counts.unknown);
    out.push_str("</div>\n");

    out.push_str("<ul class=\"collapsible\" data-collapsible=\"expandable\" id=\"collection_services\">\n");
    for entry in &view.entries {
        out.push_str(&entry.markup);
        out.push('\n');
    }
    out.push_str("</ul>\n</div>\n</body>\n</html>\n");

    out
}

/// Plain-text board for terminals.
pub fn render_text(view: &BoardView) -> String {
    let mut out = String::new();
    let width = view
        .entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0);

    let _ = writeln!(out, "client: {}", view.client_id.as_deref().unwrap_or("-"));
    let _ = writeln!(
        out,
        "services: {} total, {} healthy, {} unhealthy, {} unknown",
        view.counts.total, view.counts.healthy, view.counts.unhealthy, view.counts.unknown
    );
    for entry in &view.entries {
        let _ = writeln!(
            out,
            "[{:<5}] {:<width$}  Instances: {}  Healthy: {}  Unhealthy: {}  APIs: {}",
            entry.indicator.css_class(),
            entry.name,
            entry.instances,
            entry.healthy,
            entry.unhealthy,
            entry.apis.len(),
            width = width
        );
    }

    out
}
