//! Contracts for the managed backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stores talk to auth and item storage only through these traits, so the
//! Supabase client can be swapped for a fake in tests. Futures are `?Send`:
//! the browser runtime is single-threaded and `gloo-net` futures are not `Send`.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::sync::{Arc, Mutex};

use super::error::{AuthError, DataError};
use super::types::{AuthChangeEvent, Item, NewItem, Session};

/// Callback invoked on every auth-state change.
pub type AuthListener = Arc<dyn Fn(AuthChangeEvent, Option<&Session>) + Send + Sync>;

/// Authentication half of the backend.
#[async_trait::async_trait(?Send)]
pub trait AuthBackend: Send + Sync {
    /// Snapshot read of the currently persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the session cannot be read or refreshed.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Register for auth-change notifications. Dropping or calling
    /// [`Subscription::unsubscribe`] on the result stops delivery.
    fn on_auth_change(&self, listener: AuthListener) -> Subscription;

    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] carrying the backend's message when the
    /// credentials are refused.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] when the backend refuses the account.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns an [`AuthError`] if the backend could not revoke the session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Item storage half of the backend.
#[async_trait::async_trait(?Send)]
pub trait ItemTable: Send + Sync {
    /// All rows in backend order.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] if the table cannot be read.
    async fn list(&self) -> Result<Vec<Item>, DataError>;

    /// Insert a row and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Rejected`] when validation or permissions refuse the row.
    async fn insert(&self, item: &NewItem) -> Result<Item, DataError>;

    /// Set `resolved = true` on the row with `id` and return it.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] if the update is refused or the row is missing.
    async fn mark_resolved(&self, id: &str) -> Result<Item, DataError>;
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle for a registered listener. Releases exactly once: on
/// [`Subscription::unsubscribe`] or on drop, whichever comes first.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.release.is_some()).finish()
    }
}

// =============================================================================
// AUTH EVENTS
// =============================================================================

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(u64, AuthListener)>,
}

/// Fan-out of auth-change notifications to registered listeners.
///
/// Backend implementations own one of these and call [`AuthEvents::emit`]
/// after every session transition.
#[derive(Clone, Default)]
pub struct AuthEvents {
    registry: Arc<Mutex<ListenerRegistry>>,
}

impl AuthEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: AuthListener) -> Subscription {
        let id = {
            let mut registry = lock(&self.registry);
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, listener));
            id
        };
        let registry = Arc::clone(&self.registry);
        Subscription::new(move || {
            // Dropped outside the lock: a listener may own subscriptions of its own.
            let removed = {
                let mut registry = lock(&registry);
                registry
                    .listeners
                    .iter()
                    .position(|(listener_id, _)| *listener_id == id)
                    .map(|idx| registry.listeners.remove(idx))
            };
            drop(removed);
        })
    }

    /// Deliver `event` to every current listener.
    ///
    /// Listeners are snapshotted first so a callback may subscribe or
    /// unsubscribe without deadlocking.
    pub fn emit(&self, event: AuthChangeEvent, session: Option<&Session>) {
        let listeners: Vec<AuthListener> = lock(&self.registry)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event, session);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
