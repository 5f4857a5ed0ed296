use std::time::Duration;

use tokio::time::Instant;

use super::ErrorKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: ErrorKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Single-slot error banner with auto-expiry.
///
/// There is only ever one deadline: raising replaces both the message and the
/// deadline, so an earlier expiry can never clear a later message.
#[derive(Debug)]
pub struct Notifier {
    ttl: Duration,
    current: Option<Notice>,
    closed: bool,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            current: None,
            closed: false,
        }
    }

    pub fn raise(&mut self, kind: ErrorKind, now: Instant) {
        if self.closed {
            tracing::debug!(%kind, "notifier shut down; dropping notice");
            return;
        }
        self.current = Some(Notice {
            kind,
            message: kind.message().to_string(),
            expires_at: now + self.ttl,
        });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Clears the notice if its deadline has passed. Returns true when it did.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(n) if n.expires_at <= now => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// The current notice as seen at `now`: a passed deadline reads as empty
    /// even before [`Notifier::expire`] runs.
    pub fn live(&self, now: Instant) -> Option<&Notice> {
        self.current.as_ref().filter(|n| n.expires_at > now)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|n| n.expires_at)
    }

    /// Teardown: drop the pending deadline and ignore anything raised later.
    pub fn shutdown(&mut self) {
        self.closed = true;
        self.current = None;
    }
}

#[cfg(test)]
#[path = "../tests/sync/notice_tests.rs"]
mod tests;
