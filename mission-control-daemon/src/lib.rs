//! Mission Control daemon library.
//!
//! This library exposes internal modules for integration testing.
//! In production, `mission-control-daemon` is used as a binary (main.rs).

pub mod cli;
pub mod logging;
pub mod metrics_server;
pub mod server;
