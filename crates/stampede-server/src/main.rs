#![doc = include_str!("../README.md")]

mod server;

use clap::Parser;
use server::cluster::role::Role;
use server::cluster::supervisor::Supervisor;
use server::config::{CliArgs, ServerConfig};
use server::telemetry::init_telemetry;
use server::worker;
use tokio::signal;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    init_telemetry();

    // The role is fixed exactly once, before any socket or child process
    // exists. A process relaunched by the supervisor carries its worker
    // slot in the environment and ignores the worker count entirely, so a
    // worker can never recursively supervise.
    match Role::from_env()? {
        Role::Worker { slot } => worker::run(slot, config).await,
        Role::Primary if config.workers > 0 => {
            let supervisor = Supervisor::new(config)?;
            supervisor.run(shutdown_signal()).await
        }
        Role::Primary => worker::run(0, config).await,
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => {
            #[cfg(feature = "tracing")]
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            #[cfg(feature = "tracing")]
            tracing::info!("Received SIGTERM signal");
        },
    }
}
