//! Snapshot reconciliation.
//!
//! # Responsibilities
//! - Partition a snapshot by status (unhealthy, healthy, unknown)
//! - Recompute aggregate counts from the full snapshot
//! - Decide create vs. update per service by name lookup
//! - Apply the decisions to the owned entry map
//!
//! # Invariants
//! - A name is created at most once; later sightings are updates
//! - Entries are never removed, even when a service leaves the snapshot
//! - `counts.total == services.len()` and equals the sum of the partitions
//! - Creates are ordered unhealthy, healthy, unknown; stable within a group

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::board::entry::{AggregateCounts, RenderedEntry};
use crate::board::render::{EntryRenderer, HtmlRenderer};
use crate::board::view::{BoardView, EntryView};
use crate::fetch::types::{ServiceHealth, ServiceStatus, Snapshot};

/// Services of one snapshot grouped by status, snapshot order kept.
#[derive(Debug, Default)]
pub struct Partitions<'a> {
    pub unhealthy: Vec<&'a ServiceStatus>,
    pub healthy: Vec<&'a ServiceStatus>,
    pub unknown: Vec<&'a ServiceStatus>,
}

impl<'a> Partitions<'a> {
    pub fn of(services: &'a [ServiceStatus]) -> Self {
        let mut partitions = Partitions::default();
        for service in services {
            match service.status {
                ServiceHealth::Unhealthy => partitions.unhealthy.push(service),
                ServiceHealth::Healthy => partitions.healthy.push(service),
                ServiceHealth::Unknown => partitions.unknown.push(service),
            }
        }
        partitions
    }

    pub fn counts(&self) -> AggregateCounts {
        AggregateCounts {
            total: self.unhealthy.len() + self.healthy.len() + self.unknown.len(),
            healthy: self.healthy.len(),
            unhealthy: self.unhealthy.len(),
            unknown: self.unknown.len(),
        }
    }

    /// Unhealthy first, then healthy, then unknown.
    pub fn in_priority_order(&self) -> impl Iterator<Item = &'a ServiceStatus> + '_ {
        self.unhealthy
            .iter()
            .chain(self.healthy.iter())
            .chain(self.unknown.iter())
            .copied()
    }
}

/// Create and update decisions for one snapshot.
#[derive(Debug)]
pub struct ReconcilePlan<'a> {
    pub creates: Vec<&'a ServiceStatus>,
    pub updates: Vec<&'a ServiceStatus>,
    pub counts: AggregateCounts,
}

/// Plan a pass against a set of already known names.
///
/// Pure: the set is not modified. A name repeated within the snapshot is
/// created once and updated on each later occurrence.
pub fn plan<'a>(snapshot: &'a Snapshot, existing: &HashSet<String>) -> ReconcilePlan<'a> {
    plan_with(snapshot, |name| existing.contains(name))
}

fn plan_with<'a, F>(snapshot: &'a Snapshot, exists: F) -> ReconcilePlan<'a>
where
    F: Fn(&str) -> bool,
{
    let partitions = Partitions::of(&snapshot.services);
    let mut created: HashSet<&str> = HashSet::new();
    let mut creates = Vec::new();
    let mut updates = Vec::new();

    for service in partitions.in_priority_order() {
        let name = service.name.as_str();
        if exists(name) || created.contains(name) {
            updates.push(service);
        } else {
            created.insert(name);
            creates.push(service);
        }
    }

    ReconcilePlan {
        creates,
        updates,
        counts: partitions.counts(),
    }
}

/// Result of applying one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub creates: Vec<ServiceStatus>,
    pub updates: Vec<ServiceStatus>,
    pub counts: AggregateCounts,
}

/// Owns the board's entries; all mutation goes through [`Reconciler::reconcile`].
pub struct Reconciler {
    entries: HashMap<String, RenderedEntry>,
    /// Names in creation order.
    order: Vec<String>,
    renderer: Arc<dyn EntryRenderer>,
    client_id: Option<String>,
    counts: AggregateCounts,
    passes: u64,
    reconciled_at: Option<u64>,
}

impl Reconciler {
    pub fn new(renderer: Arc<dyn EntryRenderer>) -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            renderer,
            client_id: None,
            counts: AggregateCounts::default(),
            passes: 0,
            reconciled_at: None,
        }
    }

    /// Run one reconciliation pass.
    pub fn reconcile(&mut self, snapshot: &Snapshot) -> ReconcileOutcome {
        self.passes += 1;
        let pass = self.passes;

        let plan = plan_with(snapshot, |name| self.entries.contains_key(name));

        for service in &plan.creates {
            let entry = RenderedEntry::create(service, self.renderer.as_ref(), pass);
            tracing::info!(
                service = %service.name,
                status = service.status.as_str(),
                instances = service.instances,
                apis = service.apis.len(),
                "Service added to board"
            );
            self.order.push(service.name.clone());
            self.entries.insert(service.name.clone(), entry);
        }

        for service in &plan.updates {
            if let Some(entry) = self.entries.get_mut(&service.name) {
                tracing::debug!(
                    service = %service.name,
                    status = service.status.as_str(),
                    healthy = service.healthy,
                    unhealthy = service.unhealthy,
                    "Service updated"
                );
                entry.apply(service, pass);
            }
        }

        self.client_id = Some(snapshot.client_id.clone());
        self.counts = plan.counts;
        self.reconciled_at = Some(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        );

        tracing::info!(
            client_id = %snapshot.client_id,
            total = plan.counts.total,
            healthy = plan.counts.healthy,
            unhealthy = plan.counts.unhealthy,
            unknown = plan.counts.unknown,
            created = plan.creates.len(),
            updated = plan.updates.len(),
            "Snapshot reconciled"
        );

        ReconcileOutcome {
            creates: plan.creates.into_iter().cloned().collect(),
            updates: plan.updates.into_iter().cloned().collect(),
            counts: plan.counts,
        }
    }

    pub fn entry(&self, name: &str) -> Option<&RenderedEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in the order they were created.
    pub fn entries(&self) -> impl Iterator<Item = &RenderedEntry> + '_ {
        self.order.iter().filter_map(|name| self.entries.get(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts of the most recent snapshot.
    pub fn counts(&self) -> AggregateCounts {
        self.counts
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Number of snapshots reconciled so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Immutable projection of the current board for readers.
    pub fn view(&self) -> BoardView {
        BoardView {
            client_id: self.client_id.clone(),
            counts: self.counts,
            entries: self
                .entries()
                .map(|entry| EntryView::from_entry(entry, self.renderer.as_ref()))
                .collect(),
            passes: self.passes,
            reconciled_at: self.reconciled_at,
        }
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(Arc::new(HtmlRenderer))
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("entries", &self.order)
            .field("counts", &self.counts)
            .field("passes", &self.passes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::entry::Indicator;

    fn svc(name: &str, status: ServiceHealth) -> ServiceStatus {
        ServiceStatus {
            name: name.into(),
            status,
            instances: 1,
            healthy: if status == ServiceHealth::Healthy { 1 } else { 0 },
            unhealthy: if status == ServiceHealth::Unhealthy { 1 } else { 0 },
            apis: vec![],
        }
    }

    fn snapshot(services: Vec<ServiceStatus>) -> Snapshot {
        Snapshot {
            client_id: "c1".into(),
            services,
        }
    }

    fn names(services: &[ServiceStatus]) -> Vec<&str> {
        services.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_first_pass_creates_healthy_entry() {
        let mut reconciler = Reconciler::default();
        let snap = snapshot(vec![ServiceStatus {
            name: "svc-a".into(),
            status: ServiceHealth::Healthy,
            instances: 3,
            healthy: 3,
            unhealthy: 0,
            apis: vec![],
        }]);

        let outcome = reconciler.reconcile(&snap);
        assert_eq!(names(&outcome.creates), vec!["svc-a"]);
        assert!(outcome.updates.is_empty());
        assert_eq!(
            outcome.counts,
            AggregateCounts { total: 1, healthy: 1, unhealthy: 0, unknown: 0 }
        );

        let entry = reconciler.entry("svc-a").unwrap();
        assert_eq!(entry.indicator(), Indicator::Green);
        assert_eq!(entry.instances_label(), "Instances: 3");
        assert_eq!(entry.healthy_label(), "Healthy: 3");
        assert_eq!(entry.unhealthy_label(), "Unhealthy: 0");
    }

    #[test]
    fn test_status_flip_is_an_update() {
        let mut reconciler = Reconciler::default();
        let mut service = ServiceStatus {
            name: "svc-a".into(),
            status: ServiceHealth::Healthy,
            instances: 3,
            healthy: 3,
            unhealthy: 0,
            apis: vec![],
        };
        reconciler.reconcile(&snapshot(vec![service.clone()]));

        service.status = ServiceHealth::Unhealthy;
        service.healthy = 0;
        service.unhealthy = 3;
        let outcome = reconciler.reconcile(&snapshot(vec![service]));

        assert!(outcome.creates.is_empty());
        assert_eq!(names(&outcome.updates), vec!["svc-a"]);
        assert_eq!(outcome.counts.unhealthy, 1);

        let entry = reconciler.entry("svc-a").unwrap();
        assert_eq!(entry.indicator(), Indicator::Red);
        assert_eq!(entry.instances_label(), "Instances: 3");
        assert_eq!(entry.healthy_label(), "Healthy: 0");
        assert_eq!(entry.unhealthy_label(), "Unhealthy: 3");
        assert_eq!(reconciler.len(), 1);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut reconciler = Reconciler::default();
        let snap = snapshot(vec![
            svc("a", ServiceHealth::Healthy),
            svc("b", ServiceHealth::Unhealthy),
            svc("c", ServiceHealth::Unknown),
        ]);

        let first = reconciler.reconcile(&snap);
        let view_after_first = reconciler.view();
        let second = reconciler.reconcile(&snap);

        assert_eq!(first.creates.len(), 3);
        assert!(second.creates.is_empty());
        assert_eq!(second.updates.len(), 3);
        assert_eq!(first.counts, second.counts);

        let view_after_second = reconciler.view();
        assert_eq!(view_after_first.entries, view_after_second.entries);
    }

    #[test]
    fn test_partition_completeness() {
        let snap = snapshot(vec![
            svc("a", ServiceHealth::Healthy),
            svc("b", ServiceHealth::Unhealthy),
            svc("c", ServiceHealth::Unknown),
            svc("d", ServiceHealth::Healthy),
            svc("e", ServiceHealth::from_status("MAINTENANCE")),
        ]);

        let partitions = Partitions::of(&snap.services);
        let counts = partitions.counts();
        assert_eq!(
            partitions.unhealthy.len() + partitions.healthy.len() + partitions.unknown.len(),
            snap.services.len()
        );
        assert_eq!(counts.total, snap.services.len());
        assert_eq!(counts.healthy + counts.unhealthy + counts.unknown, counts.total);
        assert_eq!(counts.unknown, 2);
    }

    #[test]
    fn test_creates_are_ordered_by_health() {
        let snap = snapshot(vec![
            svc("h1", ServiceHealth::Healthy),
            svc("k1", ServiceHealth::Unknown),
            svc("u1", ServiceHealth::Unhealthy),
            svc("h2", ServiceHealth::Healthy),
            svc("u2", ServiceHealth::Unhealthy),
            svc("k2", ServiceHealth::Unknown),
        ]);

        let mut reconciler = Reconciler::default();
        let outcome = reconciler.reconcile(&snap);
        assert_eq!(names(&outcome.creates), vec!["u1", "u2", "h1", "h2", "k1", "k2"]);

        let order: Vec<&str> = reconciler.entries().map(|e| e.name()).collect();
        assert_eq!(order, vec!["u1", "u2", "h1", "h2", "k1", "k2"]);
    }

    #[test]
    fn test_no_duplicate_entries_across_snapshots() {
        let mut reconciler = Reconciler::default();
        let mut services = Vec::new();
        let mut total_creates = 0;

        for i in 0..5 {
            services.push(svc(&format!("svc-{}", i), ServiceHealth::Healthy));
            let outcome = reconciler.reconcile(&snapshot(services.clone()));
            assert_eq!(outcome.creates.len(), 1);
            assert_eq!(outcome.updates.len(), i);
            total_creates += outcome.creates.len();
        }

        assert_eq!(total_creates, 5);
        assert_eq!(reconciler.len(), 5);
        let unique: HashSet<&str> = reconciler.entries().map(|e| e.name()).collect();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn test_duplicate_name_within_snapshot() {
        let snap = snapshot(vec![
            svc("dup", ServiceHealth::Healthy),
            svc("dup", ServiceHealth::Unhealthy),
        ]);

        let mut reconciler = Reconciler::default();
        let outcome = reconciler.reconcile(&snap);

        // Unhealthy sighting comes first in priority order, so it creates.
        assert_eq!(outcome.creates.len(), 1);
        assert_eq!(outcome.creates[0].status, ServiceHealth::Unhealthy);
        assert_eq!(outcome.updates.len(), 1);
        assert_eq!(reconciler.len(), 1);
        assert_eq!(reconciler.entry("dup").unwrap().indicator(), Indicator::Green);
    }

    #[test]
    fn test_vanished_service_keeps_entry() {
        let mut reconciler = Reconciler::default();
        reconciler.reconcile(&snapshot(vec![
            svc("stays", ServiceHealth::Healthy),
            svc("leaves", ServiceHealth::Unhealthy),
        ]));

        let outcome = reconciler.reconcile(&snapshot(vec![svc("stays", ServiceHealth::Healthy)]));
        assert_eq!(outcome.counts.total, 1);
        assert!(reconciler.contains("leaves"));
        assert_eq!(reconciler.len(), 2);

        let gone = reconciler.entry("leaves").unwrap();
        assert_eq!(gone.indicator(), Indicator::Red);
        assert_eq!(gone.updated_pass(), 1);
    }

    #[test]
    fn test_plan_against_name_set() {
        let snap = snapshot(vec![
            svc("known", ServiceHealth::Healthy),
            svc("new", ServiceHealth::Unknown),
        ]);
        let existing: HashSet<String> = ["known".to_string()].into_iter().collect();

        let plan = plan(&snap, &existing);
        assert_eq!(plan.creates.len(), 1);
        assert_eq!(plan.creates[0].name, "new");
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].name, "known");
        assert_eq!(plan.counts.total, 2);
        assert_eq!(existing.len(), 1);
    }

    #[test]
    fn test_empty_snapshot() {
        let mut reconciler = Reconciler::default();
        let outcome = reconciler.reconcile(&snapshot(vec![]));

        assert_eq!(outcome, ReconcileOutcome::default());
        assert!(reconciler.is_empty());
        assert_eq!(reconciler.client_id(), Some("c1"));
        assert_eq!(reconciler.passes(), 1);
    }
}
