use std::path::PathBuf;

use clap::Parser;

use revolver_dashboard::config::DashboardConfig;

#[derive(Debug, Parser)]
#[command(name = "revolver-dashboard")]
#[command(about = "Status board for a Revolver API gateway", long_about = None)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "REVOLVER_DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Gateway base URL (overrides source.base_url)
    #[arg(long, env = "REVOLVER_BASE_URL")]
    pub base_url: Option<String>,

    /// Refresh period in milliseconds (overrides refresh.interval_ms)
    #[arg(long, env = "REVOLVER_REFRESH_MS")]
    pub interval_ms: Option<u64>,

    /// Board server bind address (overrides server.bind_address)
    #[arg(long, env = "REVOLVER_DASHBOARD_BIND")]
    pub bind: Option<String>,

    /// Fetch once, print the board and exit
    #[arg(long)]
    pub once: bool,
}

impl Args {
    pub fn apply_overrides(&self, config: &mut DashboardConfig) {
        if let Some(url) = &self.base_url {
            config.source.base_url = url.clone();
        }
        if let Some(ms) = self.interval_ms {
            config.refresh.interval_ms = ms;
        }
        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
    }
}
