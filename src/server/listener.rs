use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::config::Config;
use crate::files::DocumentRoot;
use crate::http::connection::{Connection, ConnectionLimits};

/// Pending-connection queue length handed to `listen(2)`.
pub const BACKLOG: u32 = 100;

/// Pause after an accept error that is not about a single connection,
/// such as running out of file descriptors.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let root = Arc::new(cfg.document_root()?);
    let listener = bind(&cfg.listen_addr).await?;

    info!(
        addr = %listener.local_addr()?,
        root = %root.path().display(),
        workers = cfg.workers,
        "Listening"
    );

    accept_loop(listener, root, cfg.limits()).await
}

/// Binds a listener with `SO_REUSEADDR` set.
pub async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = tokio::net::lookup_host(addr)
        .await
        .with_context(|| format!("resolving listen address {addr}"))?
        .next()
        .with_context(|| format!("listen address {addr} did not resolve"))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("binding {addr}"))?;

    Ok(socket.listen(BACKLOG)?)
}

/// Accepts connections forever, one task per socket.
///
/// Tasks are spawned onto the current runtime. Under the current-thread
/// runtime `main` uses, the listener and every connection share one thread
/// and make progress only when the reactor reports their socket ready.
pub async fn accept_loop(
    listener: TcpListener,
    root: Arc<DocumentRoot>,
    limits: ConnectionLimits,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) if is_connection_error(&e) => {
                debug!(error = %e, "connection failed during accept");
                continue;
            }
            Err(e) => {
                warn!(error = %e, backoff = ?ACCEPT_BACKOFF, "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let root = Arc::clone(&root);
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, root, limits);
                if let Err(e) = conn.run().await {
                    error!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(info_span!("conn", %peer)),
        );
    }
}

/// Errors that concern only the connection being accepted; the listener
/// itself is fine and the next accept can run right away.
fn is_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}
