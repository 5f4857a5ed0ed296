use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::tui_shell) enum Focus {
    #[default]
    Composer,
    List,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum EntryKind {
    Output,
    Error,
}

#[derive(Clone, Debug)]
pub(in crate::tui_shell) struct LastEntry {
    pub(in crate::tui_shell) ts: String,
    pub(in crate::tui_shell) kind: EntryKind,
    pub(in crate::tui_shell) line: String,
}

/// Shell-only state. Everything about the todo list itself lives in the engine.
pub(in crate::tui_shell) struct App {
    pub(in crate::tui_shell) endpoint: String,
    pub(in crate::tui_shell) user: UserId,

    pub(in crate::tui_shell) focus: Focus,
    pub(in crate::tui_shell) selected: usize,

    pub(in crate::tui_shell) composer: Input,
    pub(in crate::tui_shell) edit: Input,

    pub(in crate::tui_shell) last: Option<LastEntry>,
    pub(in crate::tui_shell) quit: bool,
}

impl App {
    pub(in crate::tui_shell) fn new(endpoint: impl Into<String>, user: UserId) -> Self {
        Self {
            endpoint: endpoint.into(),
            user,
            focus: Focus::default(),
            selected: 0,
            composer: Input::default(),
            edit: Input::default(),
            last: None,
            quit: false,
        }
    }

    pub(in crate::tui_shell) fn record(&mut self, settled: Settled) {
        tracing::debug!(action = %settled.action, summary = %settled.summary, "operation settled");
        self.last = Some(LastEntry {
            ts: now_ts(),
            kind: if settled.failed {
                EntryKind::Error
            } else {
                EntryKind::Output
            },
            line: format!("{}: {}", settled.action, settled.summary),
        });
    }

    /// Pulls engine-owned text and focus requests into the shell before a frame.
    pub(in crate::tui_shell) fn sync_with<S: TodoStore>(&mut self, engine: &SyncEngine<S>, view: &ViewModel) {
        self.composer.sync(&view.composer_text);

        match engine.editing() {
            Some((id, draft)) => {
                self.edit.sync(&draft);
                if let Some(pos) = view.rows.iter().position(|r| r.task.id == id) {
                    self.selected = pos;
                }
            }
            None => self.edit.clear(),
        }

        if engine.take_focus_request() && view.editing.is_none() {
            self.focus = Focus::Composer;
        }

        self.selected = self.selected.min(view.rows.len().saturating_sub(1));
    }

    pub(in crate::tui_shell) fn selected_row<'v>(&self, view: &'v ViewModel) -> Option<&'v TaskRow> {
        view.rows.get(self.selected)
    }

    pub(in crate::tui_shell) fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(in crate::tui_shell) fn select_next(&mut self, rows: usize) {
        if self.selected + 1 < rows {
            self.selected += 1;
        }
    }
}
