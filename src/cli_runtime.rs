use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use todosync::model::{ClientConfig, ConfigOverrides};

use crate::Commands;

#[derive(Parser)]
#[command(name = "todosync")]
#[command(about = "Todo list client with optimistic sync", long_about = None)]
pub(crate) struct Cli {
    /// JSON client config (defaults to $TODOSYNC_CONFIG, then ./todosync.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base url of the todo service
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// User whose todos are shown
    #[arg(long, global = true, value_name = "ID")]
    user: Option<u64>,

    /// Write logs to a file (TUI only; the TUI owns the terminal)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        config_path: cli.config,
        base_url: cli.url,
        user_id: cli.user,
    };

    match cli.command {
        None => {
            if let Some(path) = &cli.log_file {
                todosync::logging::init_file(path, "warn")?;
            }
            let config = ClientConfig::resolve(&overrides).context("load client config")?;
            todosync::tui::run_with_options(todosync::tui::TuiRunOptions { config })?;
        }
        Some(command) => {
            if cli.log_file.is_some() {
                anyhow::bail!("`--log-file` is only supported when running the TUI (no subcommand)");
            }
            todosync::logging::init_stderr("warn")?;
            let config = ClientConfig::resolve(&overrides).context("load client config")?;
            crate::cli_exec::handle_command(&config, command)?
        }
    }

    Ok(())
}
