//! Session store and auth gateway for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and user-aware views to coordinate login
//! redirects and identity-dependent rendering. The store is a read-through
//! cache of the backend session: it never invents an identity, it only maps
//! what the backend reports.
//!
//! LIFECYCLE
//! =========
//! `new` subscribes to auth-change events; `load_snapshot` performs the one
//! snapshot read; `shutdown` (or dropping the last clone) releases the
//! subscription. The snapshot and events may complete in any order and the
//! last write wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;

use super::cell::StateCell;
use crate::net::backend::{AuthBackend, Subscription};
use crate::net::error::AuthError;
use crate::net::types::{AuthChangeEvent, Identity, Session};

/// Authentication state tracking the current identity and snapshot status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub identity: Option<Identity>,
    /// True until the first snapshot read of the backend session completes.
    pub loading: bool,
}

impl AuthState {
    /// Apply a backend session (or its absence) to the cached identity.
    pub fn apply_session(&mut self, session: Option<&Session>) {
        self.identity = session.map(Identity::from_session);
    }
}

/// Session store plus the login/logout/sign-up gateway over an [`AuthBackend`].
///
/// Clones share state and the subscription.
#[derive(Clone)]
pub struct SessionStore<C = RwSignal<AuthState>>
where
    C: StateCell<AuthState>,
{
    backend: Arc<dyn AuthBackend>,
    state: C,
    subscription: Arc<Mutex<Option<Subscription>>>,
}

impl<C: StateCell<AuthState>> SessionStore<C> {
    /// Subscribe to auth changes and mark the snapshot as pending.
    pub fn new(backend: Arc<dyn AuthBackend>, state: C) -> Self {
        state.apply(|s| s.loading = true);
        let listener_state = state.clone();
        let subscription = backend.on_auth_change(Arc::new(
            move |event: AuthChangeEvent, session: Option<&Session>| {
                leptos::logging::log!("auth change: {event:?} signed_in={}", session.is_some());
                listener_state.apply(|s| s.apply_session(session));
            },
        ));
        Self { backend, state, subscription: Arc::new(Mutex::new(Some(subscription))) }
    }

    /// Read the backend's persisted session once and publish it.
    ///
    /// A failed read keeps whatever identity events have already delivered.
    pub async fn load_snapshot(&self) {
        match self.backend.current_session().await {
            Ok(session) => self.state.apply(|s| {
                s.apply_session(session.as_ref());
                s.loading = false;
            }),
            Err(e) => {
                leptos::logging::warn!("session snapshot failed: {e}");
                self.state.apply(|s| s.loading = false);
            }
        }
    }

    #[must_use]
    pub fn current_identity(&self) -> Option<Identity> {
        self.state.snapshot().identity
    }

    /// Handle to the underlying state for reactive reads.
    #[must_use]
    pub fn state(&self) -> C {
        self.state.clone()
    }

    /// Check credentials with the backend.
    ///
    /// The identity is not set here; it arrives through the auth-change
    /// notification the backend emits for the new session.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`AuthError`] unmodified.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.backend.sign_in_with_password(email, password).await.map(|_| ())
    }

    /// Sign out with the backend, then clear the identity whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`AuthError`] if sign-out failed; the identity
    /// is cleared regardless.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let result = self.backend.sign_out().await;
        self.state.apply(|s| s.identity = None);
        if let Err(e) = &result {
            leptos::logging::warn!("sign out failed: {e}");
        }
        result
    }

    /// Register a new account. Confirmation happens out of band, so the
    /// identity is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`AuthError`] unmodified.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.backend.sign_up(email, password).await
    }

    /// Release the auth-change subscription. Later calls are no-ops.
    pub fn shutdown(&self) {
        let subscription = self.subscription.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
    }
}
