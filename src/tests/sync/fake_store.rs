//! In-memory [`TodoStore`] with failure injection and an optional gate that
//! holds every call until the test releases it.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use tokio::sync::Semaphore;

use crate::model::{Task, TaskId, TaskPatch, UserId};
use crate::remote::{RemoteError, TodoStore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    List,
    Create(String),
    Remove(TaskId),
    Update(TaskId, TaskPatch),
}

pub(crate) struct FakeStore {
    tasks: RefCell<Vec<Task>>,
    next_id: Cell<u64>,
    calls: RefCell<Vec<Call>>,
    failing_ids: RefCell<HashSet<TaskId>>,
    fail_list: Cell<bool>,
    fail_create: Cell<bool>,
    update_answer_id: Cell<Option<TaskId>>,
    gate: Option<Semaphore>,
}

pub(crate) const USER: UserId = UserId(3476);

pub(crate) fn task(id: u64, title: &str, completed: bool) -> Task {
    Task {
        id: TaskId(id),
        title: title.to_string(),
        completed,
        user_id: USER,
    }
}

fn status_error(op: &'static str) -> RemoteError {
    RemoteError::Status { op, status: 500 }
}

impl FakeStore {
    pub(crate) fn new(tasks: Vec<Task>) -> Self {
        let next = tasks.iter().map(|t| t.id.get()).max().unwrap_or(0) + 1;
        Self {
            tasks: RefCell::new(tasks),
            next_id: Cell::new(next),
            calls: RefCell::new(Vec::new()),
            failing_ids: RefCell::new(HashSet::new()),
            fail_list: Cell::new(false),
            fail_create: Cell::new(false),
            update_answer_id: Cell::new(None),
            gate: None,
        }
    }

    /// Every call waits for [`FakeStore::release`] before answering.
    pub(crate) fn gated(tasks: Vec<Task>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(tasks)
        }
    }

    pub(crate) fn release(&self, calls: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(calls);
        }
    }

    pub(crate) fn fail_id(&self, id: u64) {
        self.failing_ids.borrow_mut().insert(TaskId(id));
    }

    pub(crate) fn fail_list(&self) {
        self.fail_list.set(true);
    }

    pub(crate) fn fail_create(&self) {
        self.fail_create.set(true);
    }

    /// Updates still apply, but the response carries `id` instead of the real one.
    pub(crate) fn answer_updates_as(&self, id: u64) {
        self.update_answer_id.set(Some(TaskId(id)));
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn server_tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    async fn wait(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
    }
}

impl TodoStore for FakeStore {
    async fn list(&self) -> Result<Vec<Task>, RemoteError> {
        self.calls.borrow_mut().push(Call::List);
        self.wait().await;
        if self.fail_list.get() {
            return Err(status_error("list todos"));
        }
        Ok(self.tasks.borrow().clone())
    }

    async fn create(&self, title: &str) -> Result<Task, RemoteError> {
        self.calls.borrow_mut().push(Call::Create(title.to_string()));
        self.wait().await;
        if self.fail_create.get() {
            return Err(status_error("create todo"));
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let created = task(id, title, false);
        self.tasks.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn remove(&self, id: TaskId) -> Result<(), RemoteError> {
        self.calls.borrow_mut().push(Call::Remove(id));
        self.wait().await;
        if self.failing_ids.borrow().contains(&id) {
            return Err(status_error("delete todo"));
        }
        self.tasks.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> Result<Task, RemoteError> {
        self.calls.borrow_mut().push(Call::Update(id, patch.clone()));
        self.wait().await;
        if self.failing_ids.borrow().contains(&id) {
            return Err(status_error("update todo"));
        }
        let mut tasks = self.tasks.borrow_mut();
        let Some(stored) = tasks.iter_mut().find(|t| t.id == id) else {
            return Err(RemoteError::Status {
                op: "update todo",
                status: 404,
            });
        };
        patch.apply_to(stored);
        let mut answer = stored.clone();
        if let Some(id) = self.update_answer_id.get() {
            answer.id = id;
        }
        Ok(answer)
    }
}
