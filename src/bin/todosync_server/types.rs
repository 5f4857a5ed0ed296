use super::*;

/// Requests that should fail on purpose, plus artificial latency.
#[derive(Clone, Debug, Default)]
pub(super) struct Faults {
    /// PATCH and DELETE of these ids answer 500.
    pub(super) ids: HashSet<TaskId>,
    /// POST with one of these titles answers 500.
    pub(super) titles: HashSet<String>,
    /// Applied before every mutating route.
    pub(super) latency: Duration,
}

pub(super) struct AppState {
    pub(super) todos: RwLock<TodoTable>,
    pub(super) faults: Faults,
}

impl AppState {
    pub(super) fn new(faults: Faults) -> Self {
        Self {
            todos: RwLock::new(TodoTable::default()),
            faults,
        }
    }

    pub(super) async fn delay(&self) {
        if !self.faults.latency.is_zero() {
            tokio::time::sleep(self.faults.latency).await;
        }
    }
}

/// Ids are handed out sequentially from 1 and never reused.
#[derive(Debug, Default)]
pub(super) struct TodoTable {
    last_id: u64,
    rows: BTreeMap<TaskId, Task>,
}

impl TodoTable {
    pub(super) fn insert(&mut self, title: String, user_id: UserId, completed: bool) -> Task {
        self.last_id += 1;
        let task = Task {
            id: TaskId(self.last_id),
            title,
            completed,
            user_id,
        };
        self.rows.insert(task.id, task.clone());
        task
    }

    /// All rows in id order, optionally narrowed to one user.
    pub(super) fn list(&self, user: Option<UserId>) -> Vec<Task> {
        self.rows
            .values()
            .filter(|t| user.is_none_or(|u| t.user_id == u))
            .cloned()
            .collect()
    }

    pub(super) fn update(&mut self, id: TaskId, patch: &TaskPatch) -> Option<Task> {
        let task = self.rows.get_mut(&id)?;
        patch.apply_to(task);
        Some(task.clone())
    }

    pub(super) fn remove(&mut self, id: TaskId) -> Option<Task> {
        self.rows.remove(&id)
    }
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct CreateTodoRequest {
    pub(super) title: String,
    #[serde(rename = "userId")]
    pub(super) user_id: UserId,
    #[serde(default)]
    pub(super) completed: bool,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ListQuery {
    #[serde(rename = "userId")]
    pub(super) user_id: Option<u64>,
}

#[cfg(test)]
#[path = "../../tests/bin/todosync_server/types_tests.rs"]
mod tests;
