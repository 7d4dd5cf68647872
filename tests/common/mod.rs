//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use revolver_dashboard::config::{DashboardConfig, RefreshConfig, SourceConfig};

/// Start a mock gateway whose status endpoint answers with whatever `f`
/// yields for each request.
pub async fn start_mock_gateway<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        read_request_head(&mut socket).await;
                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a mock gateway that always returns the same status document.
#[allow(dead_code)]
pub async fn start_fixed_gateway(addr: SocketAddr, body: &'static str) {
    start_mock_gateway(addr, move || async move { (200, body.to_string()) }).await;
}

async fn read_request_head(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    return;
                }
            }
        }
    }
}

/// Config pointing the fetcher at a mock gateway.
#[allow(dead_code)]
pub fn config_for(gateway: SocketAddr, interval_ms: u64) -> DashboardConfig {
    DashboardConfig {
        source: SourceConfig {
            base_url: format!("http://{}/revolver/", gateway),
            timeout_ms: 1000,
            ..SourceConfig::default()
        },
        refresh: RefreshConfig { interval_ms },
        ..DashboardConfig::default()
    }
}

/// Status document with one service per `(name, status)` pair.
#[allow(dead_code)]
pub fn status_document(services: &[(&str, &str)]) -> String {
    let services: Vec<serde_json::Value> = services
        .iter()
        .map(|(name, status)| {
            serde_json::json!({
                "name": name,
                "status": status,
                "instances": 2,
                "healthy": if *status == "HEALTHY" { 2 } else { 0 },
                "unhealthy": if *status == "UNHEALTHY" { 2 } else { 0 },
                "apis": [
                    { "path": "v1/items", "methods": ["GET", "POST"], "secured": true, "async": false }
                ]
            })
        })
        .collect();

    serde_json::json!({ "clientId": "dashboard-test", "services": services }).to_string()
}

/// Poll until `check` passes or the deadline runs out.
#[allow(dead_code)]
pub async fn wait_until<F: Fn() -> bool>(check: F) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    check()
}
