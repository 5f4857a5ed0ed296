use std::cell::{Ref, RefCell};
use std::time::Duration;

use futures::future::join_all;
use tokio::time::Instant;

use crate::model::{ClientConfig, Filter, Task, TaskId, TaskPatch, UserId, normalize_title};
use crate::remote::{RemoteError, TodoStore};

use super::notice::{Notice, Notifier};
use super::projection::{ViewModel, project};
use super::state::SyncState;
use super::{BatchReport, ErrorKind, Outcome};

#[derive(Clone, Debug)]
pub struct EngineSettings {
    pub user_id: UserId,
    pub notice_ttl: Duration,
    pub exclusive_item_ops: bool,
}

impl From<&ClientConfig> for EngineSettings {
    fn from(cfg: &ClientConfig) -> Self {
        Self {
            user_id: cfg.user_id,
            notice_ttl: cfg.notice_ttl(),
            exclusive_item_ops: cfg.exclusive_item_ops,
        }
    }
}

/// Owns the canonical todo list and reconciles it with a [`TodoStore`].
///
/// All methods take `&self`; several operations can be awaited concurrently on
/// one thread (e.g. joined or kept in a `FuturesUnordered`).
pub struct SyncEngine<S> {
    store: S,
    settings: EngineSettings,
    state: RefCell<SyncState>,
    notices: RefCell<Notifier>,
}

/// Runs `f` against the state when dropped: the "finally" branch of an operation.
struct OnSettle<'a, F: FnOnce(&mut SyncState)> {
    state: &'a RefCell<SyncState>,
    f: Option<F>,
}

impl<F: FnOnce(&mut SyncState)> Drop for OnSettle<'_, F> {
    fn drop(&mut self) {
        if let Some(f) = self.f.take() {
            f(&mut self.state.borrow_mut());
        }
    }
}

impl<S: TodoStore> SyncEngine<S> {
    pub fn new(store: S, settings: EngineSettings) -> Self {
        let notices = Notifier::new(settings.notice_ttl);
        Self {
            store,
            settings,
            state: RefCell::new(SyncState::default()),
            notices: RefCell::new(notices),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn state(&self) -> Ref<'_, SyncState> {
        self.state.borrow()
    }

    pub fn view(&self) -> ViewModel {
        let notices = self.notices.borrow();
        project(&self.state.borrow(), notices.live(Instant::now()))
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks().to_vec()
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.state.borrow().find(id).cloned()
    }

    pub fn is_busy(&self, id: TaskId) -> bool {
        self.state.borrow().busy().is_busy(id)
    }

    pub fn busy_ids(&self) -> Vec<TaskId> {
        self.state.borrow().busy().busy_ids()
    }

    pub fn is_adding(&self) -> bool {
        self.state.borrow().busy().is_adding()
    }

    pub fn placeholder(&self) -> Option<Task> {
        self.state.borrow().placeholder().cloned()
    }

    pub fn filter(&self) -> Filter {
        self.state.borrow().filter()
    }

    pub fn set_filter(&self, filter: Filter) {
        self.state.borrow_mut().filter = filter;
    }

    pub fn editing(&self) -> Option<(TaskId, String)> {
        let state = self.state.borrow();
        let id = state.edit().editing_id()?;
        let draft = state.edit().draft()?.to_string();
        Some((id, draft))
    }

    pub fn input(&self) -> String {
        self.state.borrow().composer().text().to_string()
    }

    pub fn input_enabled(&self) -> bool {
        self.state.borrow().composer().enabled()
    }

    /// Updates the composition text. Ignored while an add is in flight.
    pub fn set_input(&self, text: impl Into<String>) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.composer.enabled {
            return false;
        }
        state.composer.text = text.into();
        true
    }

    /// Returns (and resets) whether the composer asked to be focused.
    pub fn take_focus_request(&self) -> bool {
        std::mem::take(&mut self.state.borrow_mut().composer.focus_requested)
    }

    /// The banner, unless its deadline has already passed.
    pub fn notice(&self) -> Option<Notice> {
        self.notices.borrow().live(Instant::now()).cloned()
    }

    pub fn notice_deadline(&self) -> Option<Instant> {
        self.notices.borrow().deadline()
    }

    pub fn dismiss_notice(&self) {
        self.notices.borrow_mut().dismiss();
    }

    /// Fires the expiry timer if it is due.
    pub fn expire_notice(&self) -> bool {
        self.notices.borrow_mut().expire(Instant::now())
    }

    /// Teardown: cancels the pending notice timer. Requests still in flight may
    /// settle afterwards; their state changes apply but raise nothing.
    pub fn shutdown(&self) {
        self.notices.borrow_mut().shutdown();
    }

    pub fn start_edit(&self, id: TaskId) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(title) = state.find(id).map(|t| t.title.clone()) else {
            return false;
        };
        state.edit.begin(id, &title)
    }

    pub fn set_edit_draft(&self, text: impl Into<String>) -> bool {
        self.state.borrow_mut().edit.set_draft(text)
    }

    /// Escape: leave edit mode without touching the store.
    pub fn cancel_edit(&self) -> bool {
        self.state.borrow_mut().edit.cancel().is_some()
    }

    /// Confirm or blur: both end up here.
    pub async fn commit_edit(&self) -> Outcome {
        let Some((id, draft)) = self.editing() else {
            return Outcome::Unchanged;
        };
        self.rename(id, &draft).await
    }

    pub async fn load(&self) -> Outcome {
        let _settle = self.on_settle(|s| {
            s.loaded = true;
            s.composer.focus_requested = true;
        });

        match self.store.list().await {
            Ok(tasks) => {
                tracing::info!(count = tasks.len(), "loaded todos");
                self.state.borrow_mut().reset(tasks);
                Outcome::Applied
            }
            Err(err) => {
                self.state.borrow_mut().tasks.clear();
                self.fail(ErrorKind::Load, None, &err)
            }
        }
    }

    /// Adds whatever is in the composer.
    pub async fn submit_input(&self) -> Outcome {
        let text = self.input();
        self.add(&text).await
    }

    pub async fn add(&self, title: &str) -> Outcome {
        let Some(title) = normalize_title(title) else {
            self.raise(ErrorKind::Empty);
            return Outcome::Failed(ErrorKind::Empty);
        };

        {
            let mut state = self.state.borrow_mut();
            if state.busy.is_adding() {
                return Outcome::Busy;
            }
            state.placeholder = Some(Task::placeholder(&title, self.settings.user_id));
            state.busy.set_adding(true);
            state.composer.enabled = false;
        }
        let _settle = self.on_settle(|s| {
            s.placeholder = None;
            s.busy.set_adding(false);
            s.composer.enabled = true;
            s.composer.focus_requested = true;
        });

        match self.store.create(&title).await {
            Ok(task) if task.is_placeholder() => {
                let err = RemoteError::Decode {
                    op: "create todo",
                    detail: "server returned the placeholder id".to_string(),
                };
                self.fail(ErrorKind::Add, None, &err)
            }
            Ok(task) => {
                tracing::debug!(id = %task.id, "todo created");
                let mut state = self.state.borrow_mut();
                state.upsert(task);
                state.composer.text.clear();
                Outcome::Applied
            }
            Err(err) => self.fail(ErrorKind::Add, None, &err),
        }
    }

    pub async fn delete(&self, id: TaskId) -> Outcome {
        let outcome = self.delete_one(id).await;
        self.state.borrow_mut().composer.focus_requested = true;
        outcome
    }

    /// Deletes every completed item concurrently; failures stay independent.
    pub async fn clear_completed(&self) -> BatchReport {
        let ids: Vec<TaskId> = self
            .state
            .borrow()
            .tasks()
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect();

        let outcomes = join_all(ids.iter().map(|&id| self.delete_one(id))).await;
        self.state.borrow_mut().composer.focus_requested = true;

        let report = BatchReport::from_outcomes(&outcomes);
        tracing::debug!(?report, "clear completed settled");
        report
    }

    pub async fn toggle(&self, id: TaskId) -> Outcome {
        let Some(completed) = self.state.borrow().find(id).map(|t| t.completed) else {
            return Outcome::Missing;
        };
        self.set_completed(id, !completed).await
    }

    /// Completes everything, or un-completes everything when all are done.
    pub async fn toggle_all(&self) -> BatchReport {
        let (target, ids) = {
            let state = self.state.borrow();
            let tasks = state.tasks();
            if tasks.is_empty() {
                return BatchReport::default();
            }
            let target = !tasks.iter().all(|t| t.completed);
            let ids: Vec<TaskId> = tasks
                .iter()
                .filter(|t| t.completed != target)
                .map(|t| t.id)
                .collect();
            (target, ids)
        };

        let outcomes = join_all(ids.iter().map(|&id| self.set_completed(id, target))).await;

        let report = BatchReport::from_outcomes(&outcomes);
        tracing::debug!(target, ?report, "toggle all settled");
        report
    }

    /// Renames `id` to the trimmed `draft`.
    ///
    /// An empty draft deletes the item; an unchanged one just leaves edit mode.
    pub async fn rename(&self, id: TaskId, draft: &str) -> Outcome {
        let Some(current) = self.task(id) else {
            self.state.borrow_mut().edit.finish(id);
            return Outcome::Missing;
        };

        let Some(title) = normalize_title(draft) else {
            return self.delete(id).await;
        };

        if title == current.title {
            self.state.borrow_mut().edit.finish(id);
            return Outcome::Unchanged;
        }

        let Some(_busy) = self.begin_item_op(id) else {
            return Outcome::Busy;
        };

        let result = self.store.update(id, &TaskPatch::title(title)).await;
        match answered_for(id, result) {
            Ok(task) => {
                let mut state = self.state.borrow_mut();
                state.replace(id, task);
                state.edit.finish(id);
                Outcome::Applied
            }
            Err(err) => self.fail(ErrorKind::Update, Some(id), &err),
        }
    }

    async fn delete_one(&self, id: TaskId) -> Outcome {
        if self.state.borrow().find(id).is_none() {
            return Outcome::Missing;
        }
        let Some(_busy) = self.begin_item_op(id) else {
            return Outcome::Busy;
        };

        match self.store.remove(id).await {
            Ok(()) => {
                let mut state = self.state.borrow_mut();
                state.remove(id);
                state.edit.finish(id);
                Outcome::Applied
            }
            Err(err) => self.fail(ErrorKind::Delete, Some(id), &err),
        }
    }

    async fn set_completed(&self, id: TaskId, completed: bool) -> Outcome {
        let Some(_busy) = self.begin_item_op(id) else {
            return Outcome::Busy;
        };

        let result = self.store.update(id, &TaskPatch::completed(completed)).await;
        match answered_for(id, result) {
            Ok(task) => {
                if !self.state.borrow_mut().replace(id, task) {
                    tracing::debug!(%id, "dropping update for an item that is gone");
                }
                Outcome::Applied
            }
            Err(err) => self.fail(ErrorKind::Update, Some(id), &err),
        }
    }

    /// Marks `id` busy until the returned guard drops.
    ///
    /// `None` when per-item exclusivity is on and `id` already has a request in flight.
    fn begin_item_op(&self, id: TaskId) -> Option<OnSettle<'_, impl FnOnce(&mut SyncState)>> {
        {
            let mut state = self.state.borrow_mut();
            if self.settings.exclusive_item_ops && state.busy.is_busy(id) {
                tracing::debug!(%id, "item busy; refusing concurrent operation");
                return None;
            }
            state.busy.mark(id);
        }
        Some(self.on_settle(move |s| s.busy.clear(id)))
    }

    fn on_settle<F: FnOnce(&mut SyncState)>(&self, f: F) -> OnSettle<'_, F> {
        OnSettle {
            state: &self.state,
            f: Some(f),
        }
    }

    fn raise(&self, kind: ErrorKind) {
        self.notices.borrow_mut().raise(kind, Instant::now());
    }

    fn fail(&self, kind: ErrorKind, id: Option<TaskId>, err: &RemoteError) -> Outcome {
        tracing::warn!(op = err.op(), id = ?id, error = %err, "{}", kind.message());
        self.raise(kind);
        Outcome::Failed(kind)
    }
}

/// Rejects an update response that describes some other record, the
/// placeholder id included.
fn answered_for(id: TaskId, result: Result<Task, RemoteError>) -> Result<Task, RemoteError> {
    let task = result?;
    if task.id != id {
        return Err(RemoteError::Decode {
            op: "update todo",
            detail: format!("server answered for id {} instead of {id}", task.id),
        });
    }
    Ok(task)
}

#[cfg(test)]
#[path = "../tests/sync/engine_tests.rs"]
mod tests;
