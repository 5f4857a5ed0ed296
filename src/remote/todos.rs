//! `/todos` endpoints.

use super::*;

impl TodoStore for RemoteClient {
    async fn list(&self) -> Result<Vec<Task>, RemoteError> {
        tracing::debug!(user = %self.user_id, "list todos");
        let req = self.client.get(self.url("/todos")).query(&ListQuery {
            user_id: self.user_id,
        });
        let resp = self.send("list todos", req).await?;
        Self::decode("list todos", resp).await
    }

    async fn create(&self, title: &str) -> Result<Task, RemoteError> {
        tracing::debug!(user = %self.user_id, "create todo");
        let req = self.client.post(self.url("/todos")).json(&CreateTaskRequest {
            title,
            user_id: self.user_id,
            completed: false,
        });
        let resp = self.send("create todo", req).await?;
        Self::decode("create todo", resp).await
    }

    async fn remove(&self, id: TaskId) -> Result<(), RemoteError> {
        tracing::debug!(%id, "delete todo");
        let req = self.client.delete(self.url(&format!("/todos/{}", id)));
        self.send("delete todo", req).await?;
        Ok(())
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, RemoteError> {
        tracing::debug!(%id, ?patch, "update todo");
        let req = self
            .client
            .patch(self.url(&format!("/todos/{}", id)))
            .json(patch);
        let resp = self.send("update todo", req).await?;
        Self::decode("update todo", resp).await
    }
}
