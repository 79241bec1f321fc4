//! Chroma MCP HTTP server entry point

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chroma_mcp_http_server::chroma::HttpChromaProvider;
use chroma_mcp_http_server::config::Config;
use chroma_mcp_http_server::http;
use chroma_mcp_http_server::mcp::handlers::ProtocolHandlers;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chroma_mcp_http_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Chroma MCP HTTP server");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load()?;
    config.log_config();

    // Backend provider and dispatcher
    let provider = Arc::new(HttpChromaProvider::new(config.chroma.clone()));
    let handlers = Arc::new(ProtocolHandlers::new(provider));

    // Build the MCP router
    let app = http::router(handlers);

    // Bind to address and start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("MCP endpoint at http://{}/mcp", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
