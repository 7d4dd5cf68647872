//! HTTP board server subsystem.
//!
//! # Data Flow
//! ```text
//! Browser / scraper
//!     → server.rs (Axum, request ID, tracing, timeout)
//!     → handlers.rs (GET /, /api/board, /healthz)
//!     → SharedBoard.load() (latest published BoardView)
//!     → HTML page or JSON
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, DashboardServer};
