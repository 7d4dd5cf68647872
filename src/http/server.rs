//! Board server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the board handlers
//! - Wire up middleware (request ID, tracing, timeout, no-store caching)
//! - Serve until the shutdown signal fires
//!
//! # Design Decisions
//! - Handlers only read the published `BoardView`; they never reach the
//!   reconciler, so a slow client cannot stall a pass

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::board::SharedBoard;
use crate::config::DashboardConfig;
use crate::http::handlers::{get_board, get_health, get_page};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub board: SharedBoard,
    /// Page auto-refresh period, matching the polling interval.
    pub refresh_secs: u64,
}

/// HTTP server for the status board.
pub struct DashboardServer {
    router: Router,
}

impl DashboardServer {
    pub fn new(config: &DashboardConfig, board: SharedBoard) -> Self {
        let state = AppState {
            board,
            refresh_secs: config.refresh.interval_ms.div_ceil(1000),
        };

        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DashboardConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(get_page))
            .route("/api/board", get(get_board))
            .route("/healthz", get(get_health))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(SetResponseHeaderLayer::overriding(
                        header::CACHE_CONTROL,
                        HeaderValue::from_static("no-store"),
                    ))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.server.request_timeout_secs,
                    ))),
            )
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Board server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Board server draining");
            })
            .await?;

        tracing::info!("Board server stopped");
        Ok(())
    }
}
