use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::transfer::scheduler::SchedulerHandle;

pub async fn run(
    cfg: &Config,
    scheduler: SchedulerHandle,
    open_connections: Arc<AtomicUsize>,
) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    serve(listener, cfg, scheduler, open_connections).await
}

/// Accept loop over an already-bound listener. Split out from [`run`] so
/// tests can drive it on an ephemeral port.
pub async fn serve(
    listener: TcpListener,
    cfg: &Config,
    scheduler: SchedulerHandle,
    open_connections: Arc<AtomicUsize>,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let conn = Connection::new(
            socket,
            cfg.document_root.clone(),
            scheduler.clone(),
            open_connections.clone(),
            cfg.keepalive_base(),
        );
        tokio::spawn(async move {
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
