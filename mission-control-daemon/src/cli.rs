//! CLI argument definitions for mission-control-daemon.
//!
//! Uses `clap` v4 derive macros to parse command-line arguments.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use mission_control_core::config::{DEFAULT_CONFIG_PATH, MissionControlConfig};

/// Mission Control service discovery daemon.
///
/// Serves the list of running containers that expose a public TCP port,
/// formatted for display on the operator dashboard.
#[derive(Parser, Debug)]
#[command(name = "mission-control-daemon")]
#[command(version, about, long_about = None)]
pub struct DaemonCli {
    /// Path to mission-control.toml configuration file.
    ///
    /// When omitted, the default path is tried and built-in defaults are
    /// used if it does not exist.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    ///
    /// Takes precedence over the config file and environment variables.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Override log format (json, pretty).
    ///
    /// Takes precedence over the config file and environment variables.
    #[arg(long)]
    pub log_format: Option<String>,

    /// Override the HTTP listening port.
    ///
    /// Also used to drop this service's own port from discovery results.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Validate configuration file and exit without starting the daemon.
    #[arg(long)]
    pub validate: bool,
}

impl DaemonCli {
    /// Load configuration from file and environment, then apply CLI overrides.
    ///
    /// An explicitly given `--config` path must exist. Without it, a missing
    /// file at the default path falls back to built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// final configuration fails validation.
    pub async fn resolve_config(&self) -> Result<MissionControlConfig> {
        let mut config = match &self.config {
            Some(path) => MissionControlConfig::load(path).await.map_err(|e| {
                anyhow::anyhow!("failed to load config from {}: {}", path.display(), e)
            })?,
            None => MissionControlConfig::load_or_default(DEFAULT_CONFIG_PATH)
                .await
                .map_err(|e| {
                    anyhow::anyhow!("failed to load config from {}: {}", DEFAULT_CONFIG_PATH, e)
                })?,
        };

        self.apply_overrides(&mut config);
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

        Ok(config)
    }

    /// Apply CLI flag overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut MissionControlConfig) {
        if let Some(level) = &self.log_level {
            config.general.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.general.log_format = format.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
