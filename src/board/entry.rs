//! Board entries and aggregate counts.

use serde::Serialize;

use crate::board::render::EntryRenderer;
use crate::fetch::types::{ApiDescriptor, ServiceHealth, ServiceStatus};

/// Colour of a service's status icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Green,
    Red,
    Grey,
}

impl Indicator {
    /// Total mapping from status to colour; anything not healthy or
    /// unhealthy is grey.
    pub fn for_status(status: ServiceHealth) -> Self {
        match status {
            ServiceHealth::Healthy => Indicator::Green,
            ServiceHealth::Unhealthy => Indicator::Red,
            _ => Indicator::Grey,
        }
    }

    /// CSS class used on the status icon.
    pub fn css_class(&self) -> &'static str {
        match self {
            Indicator::Green => "green",
            Indicator::Red => "red",
            Indicator::Grey => "grey",
        }
    }
}

/// Service totals for one snapshot, recomputed from scratch every pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateCounts {
    pub total: usize,
    pub healthy: usize,
    pub unhealthy: usize,
    pub unknown: usize,
}

/// The persistent projection of one service on the board.
///
/// Created once, then only the status indicator and the three instance
/// counts change. The API list is rendered at creation and never touched
/// again.
#[derive(Debug, Clone)]
pub struct RenderedEntry {
    name: String,
    status: ServiceHealth,
    indicator: Indicator,
    instances: u64,
    healthy: u64,
    unhealthy: u64,
    apis: Vec<ApiDescriptor>,
    api_markup: String,
    created_pass: u64,
    updated_pass: u64,
}

impl RenderedEntry {
    pub(crate) fn create(service: &ServiceStatus, renderer: &dyn EntryRenderer, pass: u64) -> Self {
        Self {
            name: service.name.clone(),
            status: service.status,
            indicator: Indicator::for_status(service.status),
            instances: service.instances,
            healthy: service.healthy,
            unhealthy: service.unhealthy,
            apis: service.apis.clone(),
            api_markup: renderer.render_apis(service),
            created_pass: pass,
            updated_pass: pass,
        }
    }

    /// Overwrite the mutable fields with the snapshot's values.
    pub(crate) fn apply(&mut self, service: &ServiceStatus, pass: u64) {
        self.status = service.status;
        self.indicator = Indicator::for_status(service.status);
        self.instances = service.instances;
        self.healthy = service.healthy;
        self.unhealthy = service.unhealthy;
        self.updated_pass = pass;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> ServiceHealth {
        self.status
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn instances(&self) -> u64 {
        self.instances
    }

    pub fn healthy(&self) -> u64 {
        self.healthy
    }

    pub fn unhealthy(&self) -> u64 {
        self.unhealthy
    }

    /// APIs as they were when the entry was created.
    pub fn apis(&self) -> &[ApiDescriptor] {
        &self.apis
    }

    /// Pre-rendered API list markup.
    pub fn api_markup(&self) -> &str {
        &self.api_markup
    }

    pub fn created_pass(&self) -> u64 {
        self.created_pass
    }

    pub fn updated_pass(&self) -> u64 {
        self.updated_pass
    }

    pub fn instances_label(&self) -> String {
        format!("Instances: {}", self.instances)
    }

    pub fn healthy_label(&self) -> String {
        format!("Healthy: {}", self.healthy)
    }

    pub fn unhealthy_label(&self) -> String {
        format!("Unhealthy: {}", self.unhealthy)
    }
}
