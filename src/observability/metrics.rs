//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dashboard_services` (gauge): services in the last snapshot, by `state`
//! - `dashboard_entries` (gauge): entries on the board
//! - `dashboard_fetch_total` (counter): fetches by `outcome` (ok, error)
//! - `dashboard_fetch_duration_seconds` (histogram): fetch latency
//! - `dashboard_entry_actions_total` (counter): reconcile actions by `action`
//!
//! Recording is a no-op until a recorder is installed, so the poller can
//! record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::board::AggregateCounts;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one fetch attempt.
pub fn record_fetch(ok: bool, started: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("dashboard_fetch_total", "outcome" => outcome).increment(1);
    metrics::histogram!("dashboard_fetch_duration_seconds").record(started.elapsed().as_secs_f64());
}

/// Record the aggregate counts and board size after a pass.
pub fn record_board(counts: &AggregateCounts, entries: usize) {
    metrics::gauge!("dashboard_services", "state" => "total").set(counts.total as f64);
    metrics::gauge!("dashboard_services", "state" => "healthy").set(counts.healthy as f64);
    metrics::gauge!("dashboard_services", "state" => "unhealthy").set(counts.unhealthy as f64);
    metrics::gauge!("dashboard_services", "state" => "unknown").set(counts.unknown as f64);
    metrics::gauge!("dashboard_entries").set(entries as f64);
}

/// Record the create and update actions of a pass.
pub fn record_actions(creates: usize, updates: usize) {
    metrics::counter!("dashboard_entry_actions_total", "action" => "create").increment(creates as u64);
    metrics::counter!("dashboard_entry_actions_total", "action" => "update").increment(updates as u64);
}
