use crate::model::{Filter, Task, TaskId};

use super::busy::BusyTracker;
use super::edit::EditSession;

/// The composition field: text, whether it accepts input, and pending focus.
#[derive(Clone, Debug)]
pub struct Composer {
    pub(super) text: String,
    pub(super) enabled: bool,
    pub(super) focus_requested: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self {
            text: String::new(),
            enabled: true,
            focus_requested: false,
        }
    }
}

impl Composer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Everything the engine mutates. Writable only from inside `sync`.
#[derive(Debug, Default)]
pub struct SyncState {
    pub(super) tasks: Vec<Task>,
    pub(super) placeholder: Option<Task>,
    pub(super) busy: BusyTracker,
    pub(super) edit: EditSession,
    pub(super) filter: Filter,
    pub(super) composer: Composer,
    pub(super) loaded: bool,
}

impl SyncState {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn placeholder(&self) -> Option<&Task> {
        self.placeholder.as_ref()
    }

    pub fn busy(&self) -> &BusyTracker {
        &self.busy
    }

    pub fn edit(&self) -> &EditSession {
        &self.edit
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replaces the collection, dropping placeholder ids and duplicates.
    pub(super) fn reset(&mut self, tasks: Vec<Task>) {
        self.tasks.clear();
        for task in tasks {
            if task.is_placeholder() {
                tracing::warn!("ignoring server record with placeholder id");
                continue;
            }
            self.upsert(task);
        }
    }

    /// Appends `task`, or replaces the record that already has its id.
    pub(super) fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }

    /// Replaces the record stored under `id` with `task`.
    ///
    /// Returns false (and drops `task`) when `id` is gone, so a late response
    /// never resurrects a deleted item.
    pub(super) fn replace(&mut self, id: TaskId, task: Task) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks[pos] = task;
        true
    }

    pub(super) fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }
}
