use super::*;

/// An engine operation started from the keyboard, still in flight.
pub(in crate::tui_shell) type Pending<'e> = LocalBoxFuture<'e, Settled>;

/// One line for the "Last" panel, produced when an operation settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) struct Settled {
    pub(in crate::tui_shell) action: String,
    pub(in crate::tui_shell) summary: String,
    pub(in crate::tui_shell) failed: bool,
}

impl Settled {
    pub(in crate::tui_shell) fn from_outcome(action: impl Into<String>, outcome: Outcome) -> Self {
        let summary = match outcome {
            Outcome::Applied => "ok".to_string(),
            Outcome::Unchanged => "unchanged".to_string(),
            Outcome::Failed(kind) => kind.message().to_string(),
            Outcome::Missing => "no such todo".to_string(),
            Outcome::Busy => "still busy".to_string(),
        };
        Self {
            action: action.into(),
            summary,
            failed: outcome.is_failure(),
        }
    }

    pub(in crate::tui_shell) fn from_batch(action: impl Into<String>, report: BatchReport) -> Self {
        let mut summary = format!("{}/{} done", report.succeeded, report.attempted);
        if report.failed > 0 {
            summary.push_str(&format!(", {} failed", report.failed));
        }
        if report.skipped > 0 {
            summary.push_str(&format!(", {} skipped", report.skipped));
        }
        Self {
            action: action.into(),
            summary,
            failed: !report.is_clean(),
        }
    }
}

pub(super) fn load<S: TodoStore>(engine: &SyncEngine<S>) -> Pending<'_> {
    async move { Settled::from_outcome("load", engine.load().await) }.boxed_local()
}

pub(super) fn submit<S: TodoStore>(engine: &SyncEngine<S>) -> Pending<'_> {
    async move { Settled::from_outcome("add", engine.submit_input().await) }.boxed_local()
}

pub(super) fn toggle<S: TodoStore>(engine: &SyncEngine<S>, id: TaskId) -> Pending<'_> {
    async move { Settled::from_outcome(format!("toggle #{id}"), engine.toggle(id).await) }
        .boxed_local()
}

pub(super) fn delete<S: TodoStore>(engine: &SyncEngine<S>, id: TaskId) -> Pending<'_> {
    async move { Settled::from_outcome(format!("delete #{id}"), engine.delete(id).await) }
        .boxed_local()
}

pub(super) fn commit_edit<S: TodoStore>(engine: &SyncEngine<S>, id: TaskId) -> Pending<'_> {
    async move { Settled::from_outcome(format!("rename #{id}"), engine.commit_edit().await) }
        .boxed_local()
}

pub(super) fn toggle_all<S: TodoStore>(engine: &SyncEngine<S>) -> Pending<'_> {
    async move { Settled::from_batch("toggle all", engine.toggle_all().await) }.boxed_local()
}

pub(super) fn clear_completed<S: TodoStore>(engine: &SyncEngine<S>) -> Pending<'_> {
    async move { Settled::from_batch("clear completed", engine.clear_completed().await) }
        .boxed_local()
}
