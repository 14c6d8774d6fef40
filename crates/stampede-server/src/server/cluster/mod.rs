//! Process-level clustering: role detection and worker supervision.
//!
//! The cluster consists of one primary process and `workers` worker
//! processes, each a fresh instance of this same binary. Workers bind
//! their own `SO_REUSEPORT` sockets to the shared address, so the kernel
//! balances accepted connections across the cluster without the primary
//! touching a socket.
//!
//! ## Structure
//!
//! - [`role`] - Primary/worker identity, fixed once at startup.
//! - [`supervisor`] - Launches worker processes and replaces them as
//!   they die.

pub mod role;
pub mod supervisor;
