//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes apply identical unauthenticated redirect behavior. The
//! decision is a pure function of session state so it can re-run on every
//! session change.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::session::AuthState;

/// Route every unauthenticated visitor is sent to.
pub const LOGIN_PATH: &str = "/login";

/// Longest the guard waits on the boot snapshot before treating a missing
/// identity as signed out.
pub const SNAPSHOT_WAIT_MS: u64 = 3_000;

/// What a protected route should do for the current session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Identity present: render the protected child.
    Render,
    /// Session known to be empty: navigate to [`LOGIN_PATH`].
    Redirect,
    /// First snapshot read still in flight and within [`SNAPSHOT_WAIT_MS`]:
    /// render a neutral placeholder.
    Pending,
}

/// `waited_out` is set once [`SNAPSHOT_WAIT_MS`] has passed since the guard
/// mounted; from then on a missing identity always redirects.
#[must_use]
pub fn guard_decision(state: &AuthState, waited_out: bool) -> GuardDecision {
    match (&state.identity, state.loading && !waited_out) {
        (Some(_), _) => GuardDecision::Render,
        (None, true) => GuardDecision::Pending,
        (None, false) => GuardDecision::Redirect,
    }
}
