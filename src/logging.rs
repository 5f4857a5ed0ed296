//! `tracing` subscriber setup for the binaries.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub const ENV_LOG: &str = "TODOSYNC_LOG";

/// `TODOSYNC_LOG`, then `RUST_LOG`, then `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_stderr(default: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(default))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .context("install tracing subscriber")
}

/// The TUI owns stdout and stderr, so its logs go to a file.
pub fn init_file(path: &Path, default: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(default))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .try_init()
        .context("install tracing subscriber")
}
