//! The worker serve loop.
//!
//! A worker owns exactly one listening socket and answers every request
//! that reaches it. Workers do not drain on shutdown: a supervised
//! worker is killed outright by the primary, and a standalone worker
//! dies with the default signal disposition, the same way it would under
//! an external process manager.

use crate::server::config::ServerConfig;
use crate::server::service::handler::build_router;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpSocket, lookup_host};

/// Serves HTTP traffic from this process until it is killed or the
/// listener fails.
pub async fn run(slot: usize, config: ServerConfig) -> anyhow::Result<()> {
    let listener = bind_listener(&config).await?;
    log_startup_info(slot, listener.local_addr()?, &config);

    let app = build_router(config.response_mode);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Binds the worker's TCP listener.
///
/// With `reuse_port` set, the socket is opened with `SO_REUSEPORT` so
/// sibling processes can bind the same address and the kernel balances
/// accepted connections across them.
async fn bind_listener(config: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr = resolve_addr(config).await?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;

    if config.reuse_port {
        #[cfg(unix)]
        socket.set_reuseport(true)?;
        #[cfg(not(unix))]
        anyhow::bail!("SO_REUSEPORT is not supported on this platform");
    }

    socket.bind(addr)?;
    Ok(socket.listen(1024)?)
}

/// Resolves the configured hostname and port to a socket address.
///
/// Resolution happens once at startup; the first resolved address wins.
async fn resolve_addr(config: &ServerConfig) -> anyhow::Result<SocketAddr> {
    lookup_host((config.hostname.as_str(), config.port))
        .await?
        .next()
        .ok_or_else(|| anyhow::anyhow!("hostname {:?} did not resolve", config.hostname))
}

fn log_startup_info(_slot: usize, _addr: SocketAddr, _config: &ServerConfig) {
    if cfg!(debug_assertions) {
        #[cfg(feature = "tracing")]
        tracing::info!(
            "Worker {} serving on {} with full config: {:#?}",
            _slot,
            _addr,
            _config
        );
    } else {
        #[cfg(feature = "tracing")]
        tracing::info!(
            "Worker {} serving {} responses on {}",
            _slot,
            _config.response_mode,
            _addr
        );
    }
}
