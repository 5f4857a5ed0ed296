use crate::model::{Filter, Task, TaskId};

use super::notice::Notice;
use super::state::SyncState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRow {
    pub task: Task,
    pub busy: bool,
    pub placeholder: bool,
    /// Set when this row shows a rename input instead of its title.
    pub draft: Option<String>,
}

/// Everything a front end needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub filter: Filter,
    pub rows: Vec<TaskRow>,
    pub total: usize,
    pub active_count: usize,
    pub completed_count: usize,
    pub loaded: bool,
    pub editing: Option<TaskId>,
    pub composer_text: String,
    pub composer_enabled: bool,
    pub notice: Option<Notice>,
}

impl ViewModel {
    pub fn all_completed(&self) -> bool {
        self.total > 0 && self.completed_count == self.total
    }

    pub fn show_toggle_all(&self) -> bool {
        self.loaded && self.total > 0
    }

    pub fn show_footer(&self) -> bool {
        self.total > 0
    }

    pub fn clear_completed_enabled(&self) -> bool {
        self.completed_count > 0
    }

    pub fn items_left(&self) -> String {
        format!("{} items left", self.active_count)
    }
}

pub fn visible_tasks(tasks: &[Task], filter: Filter) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(move |t| filter.matches(t))
}

/// Derives the visible rows. The placeholder is appended last under every filter.
pub fn project(state: &SyncState, notice: Option<&Notice>) -> ViewModel {
    let filter = state.filter();
    let edit = state.edit();
    let busy = state.busy();

    let mut rows: Vec<TaskRow> = visible_tasks(state.tasks(), filter)
        .map(|t| TaskRow {
            task: t.clone(),
            busy: busy.is_busy(t.id),
            placeholder: false,
            draft: edit.draft_for(t.id).map(str::to_string),
        })
        .collect();

    if let Some(p) = state.placeholder() {
        rows.push(TaskRow {
            task: p.clone(),
            busy: busy.is_adding(),
            placeholder: true,
            draft: None,
        });
    }

    let total = state.tasks().len();
    let active_count = state.tasks().iter().filter(|t| !t.completed).count();

    ViewModel {
        filter,
        rows,
        total,
        active_count,
        completed_count: total - active_count,
        loaded: state.loaded(),
        editing: edit.editing_id(),
        composer_text: state.composer().text().to_string(),
        composer_enabled: state.composer().enabled(),
        notice: notice.cloned(),
    }
}

#[cfg(test)]
#[path = "../tests/sync/projection_tests.rs"]
mod tests;
