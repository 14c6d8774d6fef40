//! Worker process supervision.
//!
//! The [`Supervisor`] runs in the primary process. It launches one worker
//! process per slot by re-executing the current binary with the slot
//! number in the environment, then parks in a loop waiting for exits.
//!
//! Replacement is unconditional and immediate: no exit-status inspection,
//! no backoff, no drain. A worker that crashes in a tight loop is
//! relaunched in a tight loop, and the supervisor's log is the record of
//! it. On shutdown the remaining workers are killed outright; in-flight
//! requests are abandoned.
//!
//! Workers always bind with `SO_REUSEPORT`, so every slot shares the
//! configured address and the kernel balances accepted connections
//! across the cluster.

use crate::server::cluster::role::WORKER_SLOT_ENV;
use crate::server::config::ServerConfig;
use anyhow::Context;
use futures::future::select_all;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;
use tokio::process::{Child, Command};

/// Launches and replaces the cluster's worker processes.
pub struct Supervisor {
    config: ServerConfig,
    exe: PathBuf,
    children: BTreeMap<usize, Child>,
}

impl Supervisor {
    /// Creates a supervisor for `config.workers` slots.
    ///
    /// The worker executable is resolved once up front; every spawn and
    /// respawn re-executes the same binary.
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let exe = std::env::current_exe().context("cannot locate the worker executable")?;
        Ok(Self {
            config,
            exe,
            children: BTreeMap::new(),
        })
    }

    /// Runs the supervision loop until `shutdown` resolves.
    ///
    /// Every worker that exits, for any reason and with any status, is
    /// replaced in the same slot before the loop parks again. When
    /// `shutdown` resolves the loop stops replacing and kills whatever is
    /// still running.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
        #[cfg(not(unix))]
        anyhow::bail!("worker supervision requires SO_REUSEPORT, which needs a Unix platform");

        #[cfg(unix)]
        {
            for slot in 0..self.config.workers {
                let child = self.spawn_worker(slot)?;
                self.children.insert(slot, child);
            }

            #[cfg(feature = "tracing")]
            tracing::info!(
                "Primary {} supervising {} workers on {}:{}",
                std::process::id(),
                self.config.workers,
                self.config.hostname,
                self.config.port
            );

            let mut shutdown = std::pin::pin!(shutdown);

            loop {
                let exited = {
                    let waits: Vec<_> = self
                        .children
                        .iter_mut()
                        .map(|(slot, child)| {
                            let slot = *slot;
                            Box::pin(async move { (slot, child.wait().await) })
                        })
                        .collect();

                    // Biased so a pending shutdown always wins over a
                    // simultaneous worker exit; a dead worker must not be
                    // replaced after the operator asked us to stop.
                    tokio::select! {
                        biased;
                        () = &mut shutdown => None,
                        ((slot, status), _, remaining) = select_all(waits) => {
                            drop(remaining);
                            Some((slot, status))
                        }
                    }
                };

                let Some((slot, status)) = exited else { break };
                let _status = status.with_context(|| format!("waiting on worker {slot}"))?;

                #[cfg(feature = "tracing")]
                tracing::warn!("Worker {slot} died ({_status}); replacing it");

                let child = self.spawn_worker(slot)?;
                self.children.insert(slot, child);
            }

            #[cfg(feature = "tracing")]
            tracing::info!("Shutdown signal received, killing workers");

            for child in self.children.values_mut() {
                // Best effort: a worker that already exited has nothing
                // left to kill.
                let _ = child.start_kill();
            }

            Ok(())
        }
    }

    /// Spawns the worker for `slot`.
    ///
    /// The child is handed the validated configuration as explicit CLI
    /// arguments, with port sharing forced on so sibling workers can bind
    /// the same address. The slot travels in the environment, which is
    /// what makes the child come up as a worker instead of a second
    /// supervisor.
    fn spawn_worker(&self, slot: usize) -> anyhow::Result<Child> {
        let mut command = Command::new(&self.exe);
        command
            .env(WORKER_SLOT_ENV, slot.to_string())
            .args(["--hostname", &self.config.hostname])
            .args(["--port", &self.config.port.to_string()])
            .args(["--response-mode", &self.config.response_mode.to_string()])
            .args(["--reuse-port", "true"])
            .kill_on_drop(true);

        let child = command
            .spawn()
            .with_context(|| format!("failed to spawn worker {slot}"))?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            "Worker {slot} launched (pid {})",
            child.id().unwrap_or_default()
        );

        Ok(child)
    }
}
