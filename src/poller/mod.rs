//! Polling subsystem.
//!
//! # Data Flow
//! ```text
//! interval timer (first tick immediate)
//!     → fetch (SnapshotSource)
//!     → board::Reconciler::reconcile
//!     → SharedBoard.store(BoardView)
//! ```
//!
//! # Design Decisions
//! - The poller task is the only writer of board state
//! - Fixed period, no jitter, no backoff; a failed pass waits for the next tick
//! - Cancellation via `Shutdown` or a `PollerHandle`

pub mod driver;

pub use driver::{PollerHandle, StatusPoller};
