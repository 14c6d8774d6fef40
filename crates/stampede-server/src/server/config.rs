use anyhow::bail;
use clap::{Parser, ValueEnum};
use core::fmt;

/// Runtime configuration for the `stampede-server` binary.
///
/// These settings control the listen address, the response body served to
/// clients, and the process topology: a single standalone worker,
/// kernel-balanced siblings sharing a port, or a supervised worker
/// cluster. All values are parsed from CLI arguments or environment
/// variables, with defaults suitable for local benchmarking.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "stampede-server",
    version,
    about = "A multi-worker HTTP server for load harnesses"
)]
pub struct CliArgs {
    /// Hostname or address to listen on.
    ///
    /// Resolved once at startup; the first resolved address is used.
    ///
    /// Environment variable: `HOSTNAME`
    #[arg(long, env = "HOSTNAME", default_value_t = String::from("127.0.0.1"))]
    pub hostname: String,

    /// TCP port to listen on.
    ///
    /// Port `0` asks the kernel for an ephemeral port, which only makes
    /// sense for a single standalone worker: supervised and port-sharing
    /// workers must agree on one fixed address.
    ///
    /// Environment variable: `PORT`
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Number of supervised worker processes.
    ///
    /// `0` (the default) serves traffic directly from this process with
    /// no supervision. Any other value turns this process into a
    /// supervisor that launches one worker per slot and replaces workers
    /// as they die.
    ///
    /// Environment variable: `WORKERS`
    #[arg(long, env = "WORKERS", default_value_t = 0)]
    pub workers: usize,

    /// Share the listen address with sibling processes via `SO_REUSEPORT`.
    ///
    /// Every process binds its own socket to the same address and the
    /// kernel balances accepted connections between them. Accepts
    /// truthy/falsy forms: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`.
    ///
    /// Environment variable: `REUSE_PORT`
    #[arg(
        long,
        env = "REUSE_PORT",
        value_parser = parse_boolish,
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub reuse_port: bool,

    /// Response body served to every request.
    ///
    /// Environment variable: `RESPONSE_MODE`
    #[arg(long, env = "RESPONSE_MODE", value_enum, default_value_t = ResponseMode::Payload)]
    pub response_mode: ResponseMode,
}

/// What a worker sends back, regardless of request method or path.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// `text/plain` body `"Hello World\n"`.
    Plain,
    /// `application/json` payload carrying a random value, its spill
    /// path, and its checksum.
    Payload,
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Payload => write!(f, "payload"),
        }
    }
}

/// Parses the permissive boolean forms accepted by `REUSE_PORT`.
///
/// An empty value counts as false, so `REUSE_PORT=` behaves like an unset
/// variable.
fn parse_boolish(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean-ish value, got {other:?}")),
    }
}

/// Validated runtime configuration, shared by every process role.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub hostname: String,
    pub port: u16,
    pub workers: usize,
    pub reuse_port: bool,
    pub response_mode: ResponseMode,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.hostname.is_empty() {
            bail!("HOSTNAME must not be empty");
        }

        if args.port == 0 && args.workers > 0 {
            bail!("PORT must be non-zero when WORKERS > 0");
        }

        if args.port == 0 && args.reuse_port {
            bail!("PORT must be non-zero when REUSE_PORT is set");
        }

        Ok(Self {
            hostname: args.hostname,
            port: args.port,
            workers: args.workers,
            reuse_port: args.reuse_port,
            response_mode: args.response_mode,
        })
    }
}
