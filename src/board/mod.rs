//! Status board subsystem.
//!
//! # Data Flow
//! ```text
//! Snapshot
//!     → reconciler.rs (partition: unhealthy, healthy, unknown)
//!     → reconciler.rs (name lookup: create or update)
//!     → entry.rs (RenderedEntry mutated in place)
//!     → render.rs (markup, API list rendered once)
//!     → view.rs (BoardView published to readers)
//! ```
//!
//! # Design Decisions
//! - Entry existence is a map lookup, not a rendering concern
//! - Counts are recomputed per snapshot, never incremented
//! - Entries are never removed when a service disappears from a snapshot

pub mod entry;
pub mod reconciler;
pub mod render;
pub mod view;

pub use entry::{AggregateCounts, Indicator, RenderedEntry};
pub use reconciler::{plan, Partitions, ReconcileOutcome, ReconcilePlan, Reconciler};
pub use render::{ElementIds, EntryRenderer, HtmlRenderer};
pub use view::{render_page, render_text, shared_board, BoardView, EntryView, SharedBoard};
