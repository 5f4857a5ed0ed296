use std::collections::HashMap;

use crate::model::TaskId;

/// Which items have a request in flight, plus the add-placeholder flag.
///
/// Marks are counted so that two overlapping requests on one id keep it busy
/// until the later one settles.
#[derive(Debug, Default)]
pub struct BusyTracker {
    marks: HashMap<TaskId, usize>,
    adding: bool,
}

impl BusyTracker {
    pub fn mark(&mut self, id: TaskId) {
        *self.marks.entry(id).or_insert(0) += 1;
    }

    pub fn clear(&mut self, id: TaskId) {
        if let Some(n) = self.marks.get_mut(&id) {
            *n -= 1;
            if *n == 0 {
                self.marks.remove(&id);
            }
        }
    }

    pub fn is_busy(&self, id: TaskId) -> bool {
        if id.is_placeholder() {
            return self.adding;
        }
        self.marks.contains_key(&id)
    }

    pub fn busy_ids(&self) -> Vec<TaskId> {
        let mut ids: Vec<TaskId> = self.marks.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn is_idle(&self) -> bool {
        self.marks.is_empty() && !self.adding
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }

    pub fn set_adding(&mut self, adding: bool) {
        self.adding = adding;
    }
}
