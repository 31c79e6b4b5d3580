//! Drug lookup HTTP server binary.

use drug_service::{router, DrugServer, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServiceConfig::from_env();
    tracing::info!("Loading drug datasets from: {}", config.data_path.display());

    let files = config.dataset_files();
    for kind in files.missing_files() {
        tracing::warn!("{} file not found: {}", kind, files.path(kind).display());
    }

    // Loads run in the background; requests are served from partial data until ready
    let server = DrugServer::new();
    server.spawn_loaders(&files);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!("Starting drug lookup server on {}", listener.local_addr()?);

    axum::serve(listener, router(server)).await?;

    Ok(())
}
