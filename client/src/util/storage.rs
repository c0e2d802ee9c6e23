//! Persistence of the signed-in session across page loads.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Supabase client keeps its session in memory and mirrors every change
//! here, so a reload or a second tab starts from the last known session
//! instead of the login page. Outside the browser nothing is persisted.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use crate::net::types::Session;

/// `localStorage` key holding the serialized session.
pub const SESSION_STORAGE_KEY: &str = "lostfound.auth.session";

/// Parse a stored entry. Unreadable entries and sessions without an
/// access token count as "no session".
pub fn decode_session(raw: &str) -> Option<Session> {
    serde_json::from_str::<Session>(raw)
        .ok()
        .filter(|session| !session.access_token.is_empty())
}

/// Session saved by an earlier page load, if any. A corrupt entry is
/// dropped so it is not parsed again on every call.
pub fn load_session() -> Option<Session> {
    #[cfg(feature = "hydrate")]
    {
        let storage = local_storage()?;
        let raw = storage.get_item(SESSION_STORAGE_KEY).ok().flatten()?;
        let session = decode_session(&raw);
        if session.is_none() {
            let _ = storage.remove_item(SESSION_STORAGE_KEY);
        }
        session
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Mirror the current session; `None` erases the saved one on sign-out.
pub fn store_session(session: Option<&Session>) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let written = match session.map(serde_json::to_string) {
            Some(Ok(raw)) => storage.set_item(SESSION_STORAGE_KEY, &raw),
            Some(Err(e)) => {
                log::warn!("session not persisted: {e}");
                return;
            }
            None => storage.remove_item(SESSION_STORAGE_KEY),
        };
        if written.is_err() {
            log::warn!("localStorage rejected the session update");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = session;
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
