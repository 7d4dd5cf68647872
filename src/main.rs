//! Revolver Dashboard
//!
//! Polls a Revolver gateway's status endpoint and keeps a status board of
//! its upstream services, served as HTML and JSON.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                 REVOLVER DASHBOARD                   │
//!                     │                                                      │
//!   Gateway           │  ┌─────────┐    ┌────────────┐    ┌──────────────┐   │
//!   /v1/metadata/ ◀───┼──│  fetch  │◀───│   poller   │───▶│    board     │   │
//!   status        ────┼─▶│ client  │───▶│ (interval) │    │  reconciler  │   │
//!                     │  └─────────┘    └────────────┘    └──────┬───────┘   │
//!                     │                                          │           │
//!                     │                                          ▼           │
//!   Browser           │  ┌─────────┐                      ┌──────────────┐   │
//!   ◀─────────────────┼──│  http   │◀─────────────────────│  BoardView   │   │
//!                     │  │ server  │     (ArcSwap load)   │  (published) │   │
//!                     │  └─────────┘                      └──────────────┘   │
//!                     │                                                      │
//!                     │  config · observability · lifecycle                  │
//!                     └──────────────────────────────────────────────────────┘
//! ```

mod cli;

use clap::Parser;
use tokio::net::TcpListener;

use revolver_dashboard::board::{render_text, shared_board, Reconciler};
use revolver_dashboard::config::{read_config, validate_config, ConfigError, DashboardConfig};
use revolver_dashboard::fetch::{HttpSnapshotFetcher, SnapshotSource};
use revolver_dashboard::http::DashboardServer;
use revolver_dashboard::lifecycle::{signals, Shutdown};
use revolver_dashboard::observability::{logging, metrics};
use revolver_dashboard::poller::StatusPoller;

use crate::cli::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => DashboardConfig::default(),
    };
    args.apply_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.source.base_url,
        interval_ms = config.refresh.interval_ms,
        "revolver-dashboard starting"
    );

    let fetcher = HttpSnapshotFetcher::new(&config.source)?;

    if args.once {
        let snapshot = fetcher.fetch().await?;
        let mut reconciler = Reconciler::default();
        reconciler.reconcile(&snapshot);
        print!("{}", render_text(&reconciler.view()));
        return Ok(());
    }

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse::<std::net::SocketAddr>()?)?;
    }

    let shutdown = Shutdown::new();
    let poller_shutdown = shutdown.subscribe();
    let mut idle_shutdown = shutdown.subscribe();
    let server_shutdown = shutdown.subscribe();
    let _signals = signals::spawn_signal_listener(shutdown.clone());

    let board = shared_board();
    let poller = StatusPoller::new(fetcher, Reconciler::default(), board.clone(), &config.refresh);
    let poller_task = tokio::spawn(poller.run(poller_shutdown));

    if config.server.enabled {
        let listener = TcpListener::bind(&config.server.bind_address).await?;
        DashboardServer::new(&config, board)
            .run(listener, server_shutdown)
            .await?;
    } else {
        tracing::info!("Board server disabled, polling only");
        let _ = idle_shutdown.recv().await;
    }

    let reconciler = poller_task.await?;
    tracing::info!(
        entries = reconciler.len(),
        passes = reconciler.passes(),
        "Shutdown complete"
    );
    Ok(())
}
