#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`DiscoveryError`)
//! - [`config`]: Filter configuration (`FilterConfig`, builder)
//! - [`types`]: Runtime records and output entries (`ContainerRecord`, `ServiceEntry`)
//! - [`docker`]: Docker API abstraction (`DockerClient` trait, `BollardDockerClient`)
//! - [`title`]: Display title formatting (`format_title`, `TitleFormatter`)
//! - [`filter`]: Exclusion and port selection (`DiscoveryFilter`, `Exclusion`)
//! - [`service`]: Request-scoped entry point (`DiscoveryService`)

pub mod config;
pub mod docker;
pub mod error;
pub mod filter;
pub mod service;
pub mod title;
pub mod types;

// --- Public API Re-exports ---

// Service (main entry point)
pub use service::DiscoveryService;

// Configuration
pub use config::{FilterConfig, FilterConfigBuilder};

// Error
pub use error::DiscoveryError;

// Docker API
pub use docker::{BollardDockerClient, DockerClient};

// Filter
pub use filter::{DiscoveryFilter, Exclusion, normalize_name};

// Title
pub use title::{TitleFormatter, format_title};

// Types
pub use types::{ContainerRecord, PortBinding, ServiceEntry, Transport};
