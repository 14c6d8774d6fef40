//! HTTP service implementation for harness workers.
//!
//! Every request that reaches a worker gets a `200 OK`, whatever its
//! method or path. The interesting choice is the body: a constant
//! plain-text greeting, or a freshly generated payload that exercises the
//! CPU and the filesystem on every request.
//!
//! ## Structure
//!
//! - [`config`] - Type aliases selecting the payload generator wiring.
//! - [`handler`] - Router construction and request handlers.

pub mod config;
pub mod handler;
