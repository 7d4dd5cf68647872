//! Entry rendering.
//!
//! # Responsibilities
//! - Produce the markup for one board entry
//! - Derive deterministic element ids from the service name
//! - Render the API list once, at entry creation
//!
//! # Design Decisions
//! - The reconciler never inspects markup; existence is a map lookup
//! - Ids stay unique per service name so a browser script can patch
//!   the status icon and count chips in place

use std::fmt::Write;

use crate::board::entry::RenderedEntry;
use crate::fetch::types::ServiceStatus;

/// Renders board entries into markup.
pub trait EntryRenderer: Send + Sync {
    /// Render the API list of a service. Called once per entry.
    fn render_apis(&self, service: &ServiceStatus) -> String;

    /// Render the whole entry from its current state.
    fn render_entry(&self, entry: &RenderedEntry) -> String;
}

/// Element ids of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub item: String,
    pub status_icon: String,
    pub total_instances: String,
    pub healthy_instances: String,
    pub unhealthy_instances: String,
}

impl ElementIds {
    pub fn for_service(name: &str) -> Self {
        Self {
            item: format!("{}_service_item", name),
            status_icon: format!("{}_service_status_icon", name),
            total_instances: format!("{}_total_instances_count", name),
            healthy_instances: format!("{}_healthy_instances_count", name),
            unhealthy_instances: format!("{}_unhealthy_instances_count", name),
        }
    }
}

/// Materialize-style collapsible list markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl EntryRenderer for HtmlRenderer {
    fn render_apis(&self, service: &ServiceStatus) -> String {
        let name = escape(&service.name);
        let mut out = String::new();

        for api in &service.apis {
            out.push_str("<li class=\"api-collapsible\"><a href=\"#!\">");
            for method in &api.methods {
                let lock = if api.secured { "lock" } else { "lock_open" };
                let _ = write!(out, "<span class=\"chip\"><i class=\"small material-icons\">{}</i> ", lock);
                if api.is_async {
                    out.push_str("<i class=\"small material-icons\">swap_vert</i> ");
                }
                let _ = write!(out, "{}</span>", escape(method));
            }
            let _ = write!(out, "<span> /apis/{}/{}</span>", name, escape(&api.path));
            out.push_str("</a></li>");
        }

        out
    }

    fn render_entry(&self, entry: &RenderedEntry) -> String {
        let ids = ElementIds::for_service(&escape(entry.name()));
        let mut out = String::new();

        let _ = write!(out, "<li id=\"{}\">", ids.item);
        out.push_str("<div class=\"collapsible-header\"><div class=\"api-collapsible\">");
        let _ = write!(
            out,
            "<i class=\"material-icons circle {} service-status-icon\" id=\"{}\"></i>",
            entry.indicator().css_class(),
            ids.status_icon
        );
        let _ = write!(
            out,
            "<span class=\"service-status-icon title\">{}</span>",
            escape(entry.name())
        );
        out.push_str("<p><i class=\"small material-icons\">http</i>");
        let _ = write!(
            out,
            "<span class=\"chip\" id=\"{}\">{}</span>",
            ids.total_instances,
            entry.instances_label()
        );
        let _ = write!(
            out,
            "<span class=\"chip\" id=\"{}\">{}</span>",
            ids.healthy_instances,
            entry.healthy_label()
        );
        let _ = write!(
            out,
            "<span class=\"chip\" id=\"{}\">{}</span>",
            ids.unhealthy_instances,
            entry.unhealthy_label()
        );
        out.push_str("</p></div></div>");
        out.push_str("<div class=\"collapsible-body light-blue lighten-5\"><ul>");
        out.push_str(entry.api_markup());
        out.push_str("</ul></div></li>");

        out
    }
}

/// Escape text for use in HTML content and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
