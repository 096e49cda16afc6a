//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{Result, TrackerError};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| TrackerError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Open storage and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting annotrack {}", crate::VERSION);

    let server = ServerBuilder::new().with_config(config).build().await?;
    let server_config = server.config();

    info!(
        "Server starting at: http://{}",
        server_config.address()
    );
    info!("   GET  /health - Health check");
    info!("   GET  {} - Actions via query parameters", server_config.endpoint);
    info!("   POST {} - Actions via JSON body", server_config.endpoint);

    server.start().await
}
