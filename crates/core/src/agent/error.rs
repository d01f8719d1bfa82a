use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection, timeout, or body read failure.
    Transport,
    /// Non-2xx HTTP status, or `status != "success"` in a well-formed body.
    Status,
    /// Body that does not decode into the expected shape.
    Malformed,
}

#[derive(Debug, Clone)]
pub struct AgentDiagnosticsError {
    pub endpoint: &'static str,
    pub kind: FailureKind,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}

impl AgentDiagnosticsError {
    pub fn new(endpoint: &'static str, kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            endpoint,
            kind,
            detail: detail.into(),
            raw_output: None,
            raw_response_json: None,
        }
    }

    pub fn with_raw(mut self, text: String) -> Self {
        self.raw_response_json = serde_json::from_str::<Value>(&text).ok();
        self.raw_output = Some(text);
        self
    }
}

impl fmt::Display for AgentDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "agent error (endpoint={}, kind={:?}): {}",
            self.endpoint, self.kind, self.detail
        )
    }
}

impl std::error::Error for AgentDiagnosticsError {}

/// Classifies an error chain for logging. Errors that did not come from the
/// transport layer are treated as malformed content.
pub fn failure_kind(err: &anyhow::Error) -> FailureKind {
    err.chain()
        .find_map(|e| e.downcast_ref::<AgentDiagnosticsError>())
        .map(|diag| diag.kind)
        .unwrap_or(FailureKind::Malformed)
}
