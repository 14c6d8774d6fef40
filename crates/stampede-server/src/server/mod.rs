//! Server-side components of the `stampede` load harness.
//!
//! This module contains the building blocks necessary to run the
//! multi-worker HTTP server, including request handling, process
//! supervision, and telemetry setup.
//!
//! ## Submodules
//!
//! - [`cluster`] - Process role detection and worker supervision.
//! - [`config`] - CLI and environment configuration with validation.
//! - [`service`] - HTTP routing and request handlers.
//! - [`telemetry`] - Tracing-based structured logging initialization.
//! - [`worker`] - The serve loop a worker process runs.
//!
//! These components are wired together in the binary's `main.rs`.

pub mod cluster;
pub mod config;
pub mod service;
pub mod telemetry;
pub mod worker;
