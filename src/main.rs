use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use staticd::config::Config;
use staticd::server::listener;
use staticd::transfer::scheduler::Scheduler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let (scheduler, handle) = Scheduler::new(cfg.chunk_size);
    tokio::spawn(scheduler.run());

    let open_connections = Arc::new(AtomicUsize::new(0));

    tokio::select! {
        res = listener::run(&cfg, handle, open_connections) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
