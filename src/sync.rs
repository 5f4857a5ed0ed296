//! Optimistic synchronization between the local todo list and the remote store.
//!
//! [`SyncEngine`] owns all mutable client state. Operations are plain async
//! methods that are meant to be multiplexed on a single thread; state lives in
//! `RefCell`s that are never borrowed across an `.await`, so every
//! read-compute-write step is atomic with respect to the other operations.

use std::fmt;

mod busy;
mod edit;
mod engine;
mod notice;
mod projection;
mod state;

pub use self::busy::BusyTracker;
pub use self::edit::EditSession;
pub use self::engine::{EngineSettings, SyncEngine};
pub use self::notice::{Notice, Notifier};
pub use self::projection::{TaskRow, ViewModel, project, visible_tasks};
pub use self::state::{Composer, SyncState};

/// User-facing failure categories; each maps to one banner message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Load,
    Empty,
    Add,
    Delete,
    Update,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Load => "Unable to load todos",
            ErrorKind::Empty => "Title should not be empty",
            ErrorKind::Add => "Unable to add a todo",
            ErrorKind::Delete => "Unable to delete a todo",
            ErrorKind::Update => "Unable to update a todo",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// How a single engine operation settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The remote call succeeded and its result was merged.
    Applied,
    /// Nothing needed to change; no remote call was made.
    Unchanged,
    /// The operation failed and raised the given notification.
    Failed(ErrorKind),
    /// The target item is not in the collection.
    Missing,
    /// Refused because the item (or the add slot) already has a request in flight.
    Busy,
}

impl Outcome {
    pub fn is_failure(self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Per-item results of a fan-out operation (clear completed, toggle all).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchReport {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut report = BatchReport {
            attempted: outcomes.len(),
            ..BatchReport::default()
        };
        for outcome in outcomes {
            match outcome {
                Outcome::Applied | Outcome::Unchanged => report.succeeded += 1,
                Outcome::Failed(_) => report.failed += 1,
                Outcome::Missing | Outcome::Busy => report.skipped += 1,
            }
        }
        report
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
#[path = "tests/sync/fake_store.rs"]
pub(crate) mod fake_store;
