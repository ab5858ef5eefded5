use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to the configured log file; the TUI owns the terminal
    File,
    /// Plain stderr for one-shot commands
    Stderr,
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

pub fn init(config: &Config, target: LogTarget) -> Result<()> {
    let filter = env_filter(&config.logging.level);

    match target {
        LogTarget::File => {
            let path = config.log_file()?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::fmt()
                .compact()
                .with_ansi(false)
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow::anyhow!("Failed to install logger: {err}"))?;
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .compact()
                .with_target(false)
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|err| anyhow::anyhow!("Failed to install logger: {err}"))?;
        }
    }

    Ok(())
}
