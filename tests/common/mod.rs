#![allow(dead_code)]

use std::ffi::OsString;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

/// Dev server user for integration tests.
pub const USER: u64 = 7;

pub struct ServerGuard {
    pub base_url: String,
    _dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_server() -> Result<ServerGuard> {
    spawn_server_with(&[])
}

/// Starts `todosync-server` on an ephemeral port; `extra` is appended to its flags.
pub fn spawn_server_with(extra: &[&str]) -> Result<ServerGuard> {
    let dir = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = dir.path().join("addr.txt");

    let mut args: Vec<OsString> = vec![
        "--addr".into(),
        "127.0.0.1:0".into(),
        "--addr-file".into(),
        addr_file.clone().into_os_string(),
    ];
    args.extend(extra.iter().map(OsString::from));

    let child = Command::new(env!("CARGO_BIN_EXE_todosync-server"))
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn todosync-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        _dir: dir,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

/// Seeds a todo through the raw HTTP contract.
pub fn seed(base_url: &str, title: &str, completed: bool) -> Result<serde_json::Value> {
    let client = reqwest::blocking::Client::new();
    let created: serde_json::Value = client
        .post(format!("{}/todos", base_url))
        .json(&serde_json::json!({"title": title, "userId": USER, "completed": completed}))
        .send()
        .with_context(|| format!("seed {title}"))?
        .error_for_status()
        .context("seed status")?
        .json()
        .context("parse seeded todo")?;
    Ok(created)
}

pub fn current_thread_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")
}
