// Test helpers are intentionally partially used
#![allow(dead_code)]

use reqwest::Client;
use secure_app::bare::BareServer;
use secure_app::domain::MetricsPtr;
use secure_app::{create_router, serve};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A server running on an ephemeral local port, stopped through a oneshot
/// channel instead of a process signal.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<anyhow::Result<()>>>,
}

impl TestServer {
    // ---
    /// Start the axum variant backed by `metrics`.
    pub async fn framework(metrics: MetricsPtr) -> Self {
        // ---
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let task = tokio::spawn(serve(listener, create_router(metrics), async move {
            let _ = rx.await;
        }));

        Self::started(addr, tx, task)
    }

    /// Start the bare-socket variant.
    pub async fn bare() -> Self {
        // ---
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server = BareServer::from_listener(listener);
        let addr = server.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        let task = tokio::spawn(server.run(async move {
            let _ = rx.await;
        }));

        Self::started(addr, tx, task)
    }

    fn started(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<anyhow::Result<()>>,
    ) -> Self {
        // ---
        Self {
            addr,
            client: Client::new(),
            shutdown: Some(shutdown),
            task: Some(task),
        }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }

    /// Signal shutdown and wait for the serve loop to return.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        // ---
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        match self.task.take() {
            Some(task) => task.await?,
            None => Ok(()),
        }
    }
}
