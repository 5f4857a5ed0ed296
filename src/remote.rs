//! Client for the remote todo persistence service.

use crate::model::{ClientConfig, Task, TaskId, TaskPatch, UserId};

mod error;
pub use self::error::RemoteError;

mod http_client;

mod types;
use self::types::*;

mod todos;

/// The request contract the sync engine talks to.
///
/// Every call is independent: implementations keep no ordering between calls
/// and never retry.
#[allow(async_fn_in_trait)]
pub trait TodoStore {
    async fn list(&self) -> Result<Vec<Task>, RemoteError>;
    async fn create(&self, title: &str) -> Result<Task, RemoteError>;
    async fn remove(&self, id: TaskId) -> Result<(), RemoteError>;
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, RemoteError>;
}

impl<T: TodoStore + ?Sized> TodoStore for &T {
    async fn list(&self) -> Result<Vec<Task>, RemoteError> {
        (**self).list().await
    }

    async fn create(&self, title: &str) -> Result<Task, RemoteError> {
        (**self).create(title).await
    }

    async fn remove(&self, id: TaskId) -> Result<(), RemoteError> {
        (**self).remove(id).await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, RemoteError> {
        (**self).update(id, patch).await
    }
}

pub struct RemoteClient {
    base_url: String,
    user_id: UserId,
    client: reqwest::Client,
}

impl RemoteClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self, RemoteError> {
        let mut builder = reqwest::Client::builder().user_agent("todosync");
        if let Some(timeout) = cfg.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| RemoteError::Transport {
            op: "build client",
            source,
        })?;
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            user_id: cfg.user_id,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
