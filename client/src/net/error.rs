//! Backend failure taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Auth and data failures are terminal for the user action that triggered
//! them. Nothing here is retried; views render `to_string()` to the user, so
//! a backend-provided message must display verbatim.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Sign-in, sign-up, sign-out, or session lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend refused the request (bad credentials, unconfirmed account, ...).
    #[error("{0}")]
    Rejected(String),
    /// Transport failure; the browser's own message is shown as is.
    #[error("{0}")]
    Network(String),
    #[error("auth backend not available")]
    Unavailable,
}

/// Item table read or write failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// The backend refused the write (validation, permissions, ...).
    #[error("{0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("data backend not available")]
    Unavailable,
}

/// Pick a human-readable message from a backend error body.
///
/// The auth and data services disagree on the field name, so the first
/// non-empty of `error_description`, `msg`, `message`, `error` wins.
#[must_use]
pub fn backend_error_message(status: u16, body: &serde_json::Value) -> String {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(serde_json::Value::as_str).filter(|s| !s.is_empty()))
        .map_or_else(|| format!("request failed: {status}"), str::to_owned)
}
