//! Sequential accept loop for the bare-socket server.

use super::request::RequestLine;
use super::response::{route, Response};
use anyhow::Result;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// How long a connection may take to deliver its request head.
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on bytes read while looking for the end of the headers.
const MAX_HEAD_BYTES: usize = 8 * 1024;

/// Accepts connections and serves them one at a time, each fully handled
/// before the next `accept`.
pub struct BareServer {
    listener: TcpListener,
    read_timeout: Duration,
}

impl BareServer {
    /// Bind on `addr`. A bind failure is returned to the caller as fatal.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        // ---
        let listener = crate::server::bind(addr).await?;
        Ok(Self::from_listener(listener))
    }

    /// Wrap an already bound listener.
    pub fn from_listener(listener: TcpListener) -> Self {
        Self {
            listener,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` resolves.
    ///
    /// Shutdown is checked between connections; a connection already being
    /// handled is finished first. Accept and per-connection errors are
    /// logged and never end the loop.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        // ---
        let addr = self.listener.local_addr()?;
        info!(%addr, "bare server listening");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => break,

                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        if let Err(err) = handle_connection(stream, self.read_timeout).await {
                            warn!(%peer, "connection failed: {err}");
                        }
                    }
                    Err(err) => warn!("accept failed: {err}"),
                },
            }
        }

        info!("bare server stopped");
        Ok(())
    }
}

/// Read one request, write one response, close.
async fn handle_connection(mut stream: TcpStream, read_timeout: Duration) -> io::Result<()> {
    // ---
    let raw = match tokio::time::timeout(read_timeout, read_request_head(&mut stream)).await {
        Ok(raw) => raw?,
        Err(_) => {
            debug!("timed out waiting for request");
            return Ok(());
        }
    };

    if raw.is_empty() {
        debug!("peer closed before sending a request");
        return Ok(());
    }

    let response = match RequestLine::parse(&raw) {
        Ok(request) => {
            let response = route(&request);
            info!(
                method = request.method(),
                path = request.path(),
                version = request.version(),
                status = response.status().code(),
                "request handled"
            );
            response
        }
        Err(err) => {
            debug!("rejecting request: {err}");
            Response::from_parse_error(&err)
        }
    };

    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await
}

/// Read until the blank line ending the headers, EOF, or `MAX_HEAD_BYTES`.
///
/// Draining the whole head keeps unread request bytes from turning the
/// close into a reset before the client has seen the response.
async fn read_request_head<R>(reader: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut head = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    while head.len() < MAX_HEAD_BYTES {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    Ok(head)
}
