//! Revolver status board library.

pub mod board;
pub mod config;
pub mod fetch;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod poller;

pub use board::{BoardView, Reconciler};
pub use config::DashboardConfig;
pub use fetch::{HttpSnapshotFetcher, Snapshot};
pub use http::DashboardServer;
pub use lifecycle::Shutdown;
pub use poller::{PollerHandle, StatusPoller};
