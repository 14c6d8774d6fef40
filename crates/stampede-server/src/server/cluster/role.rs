use anyhow::Context;

/// Environment variable carrying a worker's slot index.
///
/// Present only in processes launched by the [`Supervisor`]; operators
/// never set it by hand.
///
/// [`Supervisor`]: crate::server::cluster::supervisor::Supervisor
pub const WORKER_SLOT_ENV: &str = "STAMPEDE_WORKER_SLOT";

/// Identity of this process within the cluster.
///
/// The role is determined exactly once at startup and never changes for
/// the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The process operators launch. When supervising it owns no
    /// listener; it spawns workers and replaces them as they die.
    Primary,
    /// A process launched by the supervisor to serve traffic on the
    /// given slot.
    Worker { slot: usize },
}

impl Role {
    /// Determines the process role from the environment.
    ///
    /// # Errors
    ///
    /// Fails when `STAMPEDE_WORKER_SLOT` is present but not a valid slot
    /// index.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var(WORKER_SLOT_ENV) {
            Ok(raw) => Self::from_slot(&raw),
            Err(std::env::VarError::NotPresent) => Ok(Self::Primary),
            Err(err) => Err(err).with_context(|| format!("{WORKER_SLOT_ENV} is not unicode")),
        }
    }

    fn from_slot(raw: &str) -> anyhow::Result<Self> {
        let slot = raw
            .parse()
            .with_context(|| format!("invalid {WORKER_SLOT_ENV} value: {raw:?}"))?;
        Ok(Self::Worker { slot })
    }
}
