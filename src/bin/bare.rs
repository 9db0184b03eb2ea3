//! Bare-socket variant: greeting only, no framework and no metrics.

use anyhow::Result;
use secure_app::bare::BareServer;
use secure_app::{init_tracing, shutdown_signal, ListenerConfig};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ---
    init_tracing();

    run().await.inspect_err(|err| error!("secure-app-bare failed: {err:#}"))
}

async fn run() -> Result<()> {
    // ---
    let config = ListenerConfig::from_env()?;
    info!(
        "Starting secure-app-bare v{} on port {}...",
        env!("CARGO_PKG_VERSION"),
        config.port
    );

    let server = BareServer::bind(config.bind_addr()).await?;
    server.run(shutdown_signal()).await
}
