//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::TrackerError;
use std::io::ErrorKind;
use tracing::{info, warn};

impl HttpServer {
    /// Resolve on Ctrl+C or SIGTERM
    pub async fn shutdown_signal() {
        let ctrl_c = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C signal, shutting down gracefully"),
                Err(e) => {
                    warn!("Failed to install Ctrl+C handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                    info!("Received terminate signal, shutting down gracefully");
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }

    /// Turn a bind failure into an actionable message
    pub(crate) fn format_bind_error(
        error: std::io::Error,
        bind_addr: &str,
        port: u16,
    ) -> TrackerError {
        let error_str = error.to_string();

        if error.kind() == ErrorKind::AddrInUse
            || error_str.contains("os error 48")
            || error_str.contains("os error 98")
        {
            TrackerError::server(format!(
                "Port {} is already in use. Stop the process holding it (lsof -i:{}) \
                 or pick another port with --port {} or ANNOTRACK_PORT={}",
                port,
                port,
                port.saturating_add(1),
                port.saturating_add(1)
            ))
        } else if error.kind() == ErrorKind::PermissionDenied || error_str.contains("os error 13")
        {
            TrackerError::server(format!(
                "Permission denied for port {}. Use a port >= 1024, e.g. --port 8080",
                port
            ))
        } else {
            TrackerError::server(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
