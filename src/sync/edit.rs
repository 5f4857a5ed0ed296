use crate::model::TaskId;

/// Inline rename lifecycle. Only one item can be in `Editing` at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Viewing,
    Editing {
        id: TaskId,
        draft: String,
    },
}

impl EditSession {
    /// Enters `Editing` with the current title as the draft.
    ///
    /// Refused while a different item is being edited.
    pub fn begin(&mut self, id: TaskId, title: &str) -> bool {
        match self {
            EditSession::Viewing => {
                *self = EditSession::Editing {
                    id,
                    draft: title.to_string(),
                };
                true
            }
            EditSession::Editing { id: current, .. } => *current == id,
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        match self {
            EditSession::Editing { draft, .. } => {
                *draft = text.into();
                true
            }
            EditSession::Viewing => false,
        }
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        match self {
            EditSession::Editing { id, .. } => Some(*id),
            EditSession::Viewing => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            EditSession::Editing { draft, .. } => Some(draft),
            EditSession::Viewing => None,
        }
    }

    pub fn draft_for(&self, id: TaskId) -> Option<&str> {
        match self {
            EditSession::Editing { id: current, draft } if *current == id => Some(draft),
            _ => None,
        }
    }

    /// Escape: discard the draft. Returns the id that was being edited.
    pub fn cancel(&mut self) -> Option<TaskId> {
        let id = self.editing_id();
        *self = EditSession::Viewing;
        id
    }

    /// Leaves `Editing` if (and only if) `id` is the item being edited.
    pub fn finish(&mut self, id: TaskId) {
        if self.editing_id() == Some(id) {
            *self = EditSession::Viewing;
        }
    }
}
