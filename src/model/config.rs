use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ids::UserId;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_CONFIG_FILE: &str = "todosync.json";

const ENV_CONFIG: &str = "TODOSYNC_CONFIG";
const ENV_BASE_URL: &str = "TODOSYNC_BASE_URL";
const ENV_USER_ID: &str = "TODOSYNC_USER_ID";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_notice_ttl_ms() -> u64 {
    3_000
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub user_id: UserId,

    /// How long an error notification stays up before it expires.
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,

    /// Refuse a second mutation on an item while one is still in flight.
    #[serde(default)]
    pub exclusive_item_ops: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: UserId::default(),
            notice_ttl_ms: default_notice_ttl_ms(),
            request_timeout_ms: None,
            exclusive_item_ops: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid value for {name}: `{value}`")]
    InvalidEnv { name: &'static str, value: String },
    #[error("no user id configured (set `user_id` in todosync.json, TODOSYNC_USER_ID or --user)")]
    MissingUser,
    #[error("base url must not be empty")]
    EmptyBaseUrl,
}

/// Values supplied on the command line; they win over file and environment.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub user_id: Option<u64>,
}

impl ClientConfig {
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the config file, then the process environment, then `overrides`.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    pub fn resolve_with(
        overrides: &ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = overrides
            .config_path
            .clone()
            .or_else(|| env(ENV_CONFIG).map(PathBuf::from))
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.is_file().then_some(local)
            });

        let mut cfg = match path {
            Some(path) => Self::read(&path)?,
            None => Self::default(),
        };

        if let Some(url) = env(ENV_BASE_URL) {
            cfg.base_url = url;
        }
        if let Some(raw) = env(ENV_USER_ID) {
            let id = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_USER_ID,
                    value: raw.clone(),
                })?;
            cfg.user_id = UserId(id);
        }

        if let Some(url) = &overrides.base_url {
            cfg.base_url = url.clone();
        }
        if let Some(id) = overrides.user_id {
            cfg.user_id = UserId(id);
        }

        cfg.base_url = cfg.base_url.trim().trim_end_matches('/').to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.user_id.get() == 0 {
            return Err(ConfigError::MissingUser);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/model/config_tests.rs"]
mod tests;
