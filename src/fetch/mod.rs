//! Snapshot fetching subsystem.
//!
//! # Data Flow
//! ```text
//! poller tick
//!     → client.rs (GET <base>/v1/metadata/status, timeout)
//!     → types.rs (deserialize Snapshot)
//!     → Ok(Snapshot)  → reconciler
//!     → Err(FetchError) → pass skipped, board keeps last known good
//! ```

pub mod client;
pub mod types;

pub use client::{FetchError, HttpSnapshotFetcher, SnapshotSource};
pub use types::{ApiDescriptor, ServiceHealth, ServiceStatus, Snapshot};
