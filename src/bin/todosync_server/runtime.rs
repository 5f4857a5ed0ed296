use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::routes::router;
use super::*;

#[derive(Parser)]
#[command(name = "todosync-server")]
#[command(about = "In-memory todo service (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Make PATCH and DELETE of this id answer 500 (repeatable)
    #[arg(long = "fail-id", value_name = "ID")]
    fail_ids: Vec<TaskId>,

    /// Make POST with this title answer 500 (repeatable)
    #[arg(long = "fail-title", value_name = "TITLE")]
    fail_titles: Vec<String>,

    /// Delay before answering mutating requests
    #[arg(long, value_name = "MS", default_value_t = 0)]
    latency_ms: u64,
}

impl Args {
    fn faults(&self) -> Faults {
        Faults {
            ids: self.fail_ids.iter().copied().collect(),
            titles: self.fail_titles.iter().cloned().collect(),
            latency: Duration::from_millis(self.latency_ms),
        }
    }
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    todosync::logging::init_stderr("info")?;

    let faults = args.faults();
    if !faults.ids.is_empty() || !faults.titles.is_empty() {
        tracing::info!(ids = ?faults.ids, titles = ?faults.titles, "fault injection enabled");
    }
    let state = Arc::new(AppState::new(faults));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;

    let local_addr = listener.local_addr().context("read listener local addr")?;
    tracing::info!(%local_addr, "todosync-server listening");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
