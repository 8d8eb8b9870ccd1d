use karaoke_finder::catalog::{JsonFileCatalog, StaticCatalog, VenueCatalog};
use karaoke_finder::config::load_app_config;
use karaoke_finder::{build_app, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let venues = match &config.catalog_path {
        Some(path) => JsonFileCatalog::new(path).venues()?,
        None => StaticCatalog::shibuya().venues()?,
    };
    info!("Catalog ready with {} venues", venues.len());

    let bind_addr = config.bind_addr;
    let app = build_app(AppState::new(venues, config));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, starting graceful shutdown");
}
