//! Write seam between stores and whatever holds their state.
//!
//! DESIGN
//! ======
//! In the app a store publishes into an `RwSignal` so views re-render; in
//! tests and headless use it publishes into an `Arc<Mutex<_>>`. Store logic
//! is written once against [`StateCell`].

use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;

/// Shared, clonable handle to one piece of store state.
pub trait StateCell<S>: Clone + Send + Sync + 'static {
    /// Untracked copy of the current value.
    fn snapshot(&self) -> S;

    /// Mutate the value in place and notify readers.
    fn apply(&self, f: impl FnOnce(&mut S));
}

impl<S> StateCell<S> for RwSignal<S>
where
    S: Clone + Default + Send + Sync + 'static,
{
    fn snapshot(&self) -> S {
        // A disposed signal reads as empty state rather than panicking.
        self.try_get_untracked().unwrap_or_default()
    }

    fn apply(&self, f: impl FnOnce(&mut S)) {
        let _ = self.try_update(f);
    }
}

impl<S> StateCell<S> for Arc<Mutex<S>>
where
    S: Clone + Send + 'static,
{
    fn snapshot(&self) -> S {
        self.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn apply(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.lock().unwrap_or_else(PoisonError::into_inner));
    }
}
