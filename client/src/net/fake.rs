//! In-memory backend double for store and view tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::backend::{AuthBackend, AuthEvents, AuthListener, ItemTable, Subscription};
use super::error::{AuthError, DataError};
use super::types::{AuthChangeEvent, Item, NewItem, Session, SessionUser};

pub fn session(id: &str, email: &str) -> Session {
    Session {
        access_token: format!("token-{id}"),
        refresh_token: None,
        expires_at: None,
        user: SessionUser { id: id.to_owned(), email: Some(email.to_owned()) },
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Default)]
pub struct FakeAuth {
    pub events: AuthEvents,
    /// email -> (password, user id)
    accounts: Mutex<HashMap<String, (String, String)>>,
    persisted: Mutex<Option<Session>>,
    pub snapshot_error: Mutex<Option<AuthError>>,
    pub sign_out_error: Mutex<Option<AuthError>>,
    /// When set, sign-in succeeds without notifying listeners.
    pub silent_sign_in: Mutex<bool>,
    pub sign_out_calls: AtomicUsize,
}

impl FakeAuth {
    pub fn with_account(self, email: &str, password: &str, id: &str) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_owned(), (password.to_owned(), id.to_owned()));
        self
    }

    pub fn with_persisted(self, session: Session) -> Self {
        *self.persisted.lock().unwrap() = Some(session);
        self
    }

    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }
}

#[async_trait::async_trait(?Send)]
impl AuthBackend for FakeAuth {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        if let Some(err) = self.snapshot_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.persisted.lock().unwrap().clone())
    }

    fn on_auth_change(&self, listener: AuthListener) -> Subscription {
        self.events.subscribe(listener)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let account = self.accounts.lock().unwrap().get(email).cloned();
        let Some((expected, id)) = account else {
            return Err(AuthError::Rejected("Invalid login credentials".to_owned()));
        };
        if expected != password {
            return Err(AuthError::Rejected("Invalid login credentials".to_owned()));
        }
        let s = session(&id, email);
        *self.persisted.lock().unwrap() = Some(s.clone());
        if !*self.silent_sign_in.lock().unwrap() {
            self.events.emit(AuthChangeEvent::SignedIn, Some(&s));
        }
        Ok(s)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(AuthError::Rejected("User already registered".to_owned()));
        }
        let id = format!("u{}", accounts.len() + 1);
        accounts.insert(email.to_owned(), (password.to_owned(), id));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.sign_out_error.lock().unwrap().clone() {
            return Err(err);
        }
        *self.persisted.lock().unwrap() = None;
        Ok(())
    }
}

// =============================================================================
// ITEMS
// =============================================================================

#[derive(Default)]
pub struct FakeItems {
    pub rows: Mutex<Vec<Item>>,
    pub list_error: Mutex<Option<DataError>>,
    pub insert_error: Mutex<Option<DataError>>,
    pub inserted: Mutex<Vec<NewItem>>,
    pub update_calls: AtomicUsize,
}

impl FakeItems {
    pub fn with_rows(rows: Vec<Item>) -> Self {
        Self { rows: Mutex::new(rows), ..Self::default() }
    }
}

#[async_trait::async_trait(?Send)]
impl ItemTable for FakeItems {
    async fn list(&self) -> Result<Vec<Item>, DataError> {
        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn insert(&self, item: &NewItem) -> Result<Item, DataError> {
        if let Some(err) = self.insert_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.inserted.lock().unwrap().push(item.clone());
        let mut rows = self.rows.lock().unwrap();
        let row = Item {
            id: format!("item-{}", rows.len() + 1),
            kind: item.kind,
            title: item.title.clone(),
            description: item.description.clone(),
            location: item.location.clone(),
            contact: item.contact.clone(),
            image_url: item.image_url.clone(),
            created_at: None,
            resolved: false,
            created_by: item.created_by.clone(),
        };
        rows.insert(0, row.clone());
        Ok(row)
    }

    async fn mark_resolved(&self, id: &str) -> Result<Item, DataError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| DataError::NotFound(id.to_owned()))?;
        row.resolved = true;
        Ok(row.clone())
    }
}
