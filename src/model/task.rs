use serde::{Deserialize, Serialize};

use super::ids::{TaskId, UserId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,

    #[serde(rename = "userId")]
    pub user_id: UserId,
}

impl Task {
    /// The optimistic stand-in shown while a create request is in flight.
    pub fn placeholder(title: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id: TaskId::PLACEHOLDER,
            title: title.into(),
            completed: false,
            user_id,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_placeholder()
    }
}

/// Partial update body for `PATCH /todos/{id}`; unset fields are omitted on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }

    /// Applies the set fields onto `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Trims a user-entered title; `None` when nothing is left.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
