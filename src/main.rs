use anyhow::Result;
use secure_app::{bind, create_metrics, create_router, init_tracing, serve, shutdown_signal, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    init_tracing();

    run().await.inspect_err(|err| error!("secure-app failed: {err:#}"))
}

async fn run() -> Result<()> {
    // ---
    let config = AppConfig::from_env()?;
    info!(
        "Starting secure-app v{} on port {}...",
        env!("CARGO_PKG_VERSION"),
        config.listener.port
    );

    let metrics = create_metrics(&config.metrics)?;
    let router = create_router(metrics);

    let listener = bind(config.listener.bind_addr()).await?;
    serve(listener, router, shutdown_signal()).await
}
