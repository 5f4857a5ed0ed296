#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("{op}: request failed: {source}")]
    Transport {
        op: &'static str,
        source: reqwest::Error,
    },
    #[error("{op}: server answered {status}")]
    Status { op: &'static str, status: u16 },
    #[error("{op}: could not decode response: {detail}")]
    Decode { op: &'static str, detail: String },
}

impl RemoteError {
    pub fn op(&self) -> &'static str {
        match self {
            RemoteError::Transport { op, .. }
            | RemoteError::Status { op, .. }
            | RemoteError::Decode { op, .. } => op,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
