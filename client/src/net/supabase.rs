//! Supabase implementation of the backend contracts.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the GoTrue
//! auth API and the PostgREST `items` table. Server-side (SSR): every call
//! reports the backend as unavailable, since sessions live in the browser.
//!
//! SESSION HANDLING
//! ================
//! The session is kept in memory and mirrored to `localStorage`. Auth-change
//! notifications are emitted locally right after the session changes, before
//! the triggering call returns, so a caller that awaited `sign_in` observes
//! the new identity immediately.
//!
//! Every data call checks the session first: an expired token is refreshed
//! (`TokenRefreshed`) or, failing that, dropped (`SignedOut`). A 401 from
//! PostgREST triggers the same renewal, so the UI never keeps showing a user
//! whose token the backend no longer accepts.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::sync::{Arc, Mutex, PoisonError};

use super::backend::{AuthBackend, AuthEvents, AuthListener, ItemTable, Subscription};
use super::error::{AuthError, DataError};
use super::types::{BackendConfig, Item, NewItem, Session};
#[cfg(feature = "hydrate")]
use super::types::AuthChangeEvent;

#[cfg(any(test, feature = "hydrate"))]
const ITEMS_TABLE: &str = "items";

#[cfg(any(test, feature = "hydrate"))]
fn token_endpoint(base_url: &str, grant_type: &str) -> String {
    format!("{base_url}/auth/v1/token?grant_type={grant_type}")
}

#[cfg(any(test, feature = "hydrate"))]
fn signup_endpoint(base_url: &str) -> String {
    format!("{base_url}/auth/v1/signup")
}

#[cfg(any(test, feature = "hydrate"))]
fn logout_endpoint(base_url: &str) -> String {
    format!("{base_url}/auth/v1/logout")
}

#[cfg(any(test, feature = "hydrate"))]
fn items_list_endpoint(base_url: &str) -> String {
    format!("{base_url}/rest/v1/{ITEMS_TABLE}?select=*&order=created_at.desc")
}

#[cfg(any(test, feature = "hydrate"))]
fn items_insert_endpoint(base_url: &str) -> String {
    format!("{base_url}/rest/v1/{ITEMS_TABLE}")
}

#[cfg(any(test, feature = "hydrate"))]
fn item_update_endpoint(base_url: &str, item_id: &str) -> String {
    format!("{base_url}/rest/v1/{ITEMS_TABLE}?id=eq.{item_id}")
}

/// Parse a GoTrue token response, deriving `expires_at` from `expires_in`
/// when the server omits it.
///
/// # Errors
///
/// Returns [`AuthError::Rejected`] if the body is not a session.
#[cfg(any(test, feature = "hydrate"))]
fn session_from_token_response(body: serde_json::Value, now_secs: i64) -> Result<Session, AuthError> {
    let expires_in = body.get("expires_in").and_then(serde_json::Value::as_i64);
    let mut session: Session =
        serde_json::from_value(body).map_err(|e| AuthError::Rejected(format!("unexpected auth response: {e}")))?;
    if session.expires_at.is_none() {
        session.expires_at = expires_in.map(|secs| now_secs + secs);
    }
    Ok(session)
}

/// First row of a `return=representation` write response.
#[cfg(any(test, feature = "hydrate"))]
fn first_row(body: serde_json::Value) -> Result<Option<Item>, DataError> {
    let rows: Vec<Item> =
        serde_json::from_value(body).map_err(|e| DataError::Rejected(format!("unexpected data response: {e}")))?;
    Ok(rows.into_iter().next())
}

/// PostgREST status for an expired or otherwise invalid JWT.
#[cfg(any(test, feature = "hydrate"))]
const UNAUTHORIZED: u16 = 401;

/// What to do with the stored session around an authorized call.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Clone, PartialEq, Eq)]
enum Renewal {
    /// The current credential (session token or anon key) is usable.
    Keep,
    /// Exchange this refresh token for a new session.
    Refresh(String),
    /// The session cannot be renewed; drop it.
    SignOut,
}

/// Decide whether the session must be renewed. `rejected` means the backend
/// just refused the current access token.
#[cfg(any(test, feature = "hydrate"))]
fn renewal_for(session: Option<&Session>, now_secs: i64, rejected: bool) -> Renewal {
    let Some(session) = session else {
        return Renewal::Keep;
    };
    if !rejected && !session.is_expired(now_secs) {
        return Renewal::Keep;
    }
    match session.refresh_token.as_deref() {
        Some(token) if !token.is_empty() => Renewal::Refresh(token.to_owned()),
        _ => Renewal::SignOut,
    }
}

#[derive(Default)]
struct Inner {
    config: Mutex<Option<BackendConfig>>,
    session: Mutex<Option<Session>>,
    events: AuthEvents,
}

/// HTTP client for one Supabase project. Clones share session and listeners.
#[derive(Clone, Default)]
pub struct SupabaseClient {
    inner: Arc<Inner>,
}

impl SupabaseClient {
    /// Unconfigured client; calls fail with `Unavailable` until [`Self::configure`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&self, config: BackendConfig) {
        let config = BackendConfig {
            supabase_url: config.supabase_url.trim_end_matches('/').to_owned(),
            supabase_anon_key: config.supabase_anon_key,
        };
        *self.inner.config.lock().unwrap_or_else(PoisonError::into_inner) = Some(config);
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.config.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    #[cfg(any(test, feature = "hydrate"))]
    fn config(&self) -> Option<BackendConfig> {
        self.inner.config.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[cfg(any(test, feature = "hydrate"))]
    fn session(&self) -> Option<Session> {
        self.inner.session.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Bearer credential: the user's access token, or the anon key when signed out.
    #[cfg(any(test, feature = "hydrate"))]
    fn bearer(&self, config: &BackendConfig) -> String {
        self.session()
            .map_or_else(|| config.supabase_anon_key.clone(), |s| s.access_token)
    }

    /// Replace the session, persist it, and notify listeners.
    #[cfg(feature = "hydrate")]
    fn set_session(&self, session: Option<Session>, event: AuthChangeEvent) {
        crate::util::storage::store_session(session.as_ref());
        *self.inner.session.lock().unwrap_or_else(PoisonError::into_inner) = session.clone();
        self.inner.events.emit(event, session.as_ref());
    }
}

#[cfg(feature = "hydrate")]
mod http {
    use gloo_net::http::{Request, RequestBuilder};

    pub(super) struct Reply {
        pub ok: bool,
        pub status: u16,
        pub body: serde_json::Value,
    }

    pub(super) fn authorized(builder: RequestBuilder, anon_key: &str, bearer: &str) -> RequestBuilder {
        builder
            .header("apikey", anon_key)
            .header("Authorization", &format!("Bearer {bearer}"))
    }

    pub(super) async fn send(request: Result<Request, gloo_net::Error>) -> Result<Reply, String> {
        let resp = request
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let text = resp.text().await.map_err(|e| e.to_string())?;
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::Null)
        };
        Ok(Reply { ok: resp.ok(), status: resp.status(), body })
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn now_secs() -> i64 {
        (js_sys::Date::now() / 1000.0) as i64
    }
}

#[cfg(feature = "hydrate")]
impl SupabaseClient {
    async fn refresh_session(&self, config: &BackendConfig, refresh_token: &str) -> Result<Session, AuthError> {
        let request = http::authorized(
            gloo_net::http::Request::post(&token_endpoint(&config.supabase_url, "refresh_token")),
            &config.supabase_anon_key,
            &config.supabase_anon_key,
        )
        .json(&serde_json::json!({ "refresh_token": refresh_token }));
        let reply = http::send(request).await.map_err(AuthError::Network)?;
        if !reply.ok {
            return Err(AuthError::Rejected(super::error::backend_error_message(reply.status, &reply.body)));
        }
        session_from_token_response(reply.body, http::now_secs())
    }

    /// Carry out `renewal` and publish the outcome to listeners.
    async fn renew(&self, config: &BackendConfig, renewal: Renewal) -> Option<Session> {
        match renewal {
            Renewal::Keep => self.session(),
            Renewal::Refresh(token) => match self.refresh_session(config, &token).await {
                Ok(session) => {
                    self.set_session(Some(session.clone()), AuthChangeEvent::TokenRefreshed);
                    Some(session)
                }
                Err(e) => {
                    leptos::logging::warn!("session refresh failed: {e}");
                    self.set_session(None, AuthChangeEvent::SignedOut);
                    None
                }
            },
            Renewal::SignOut => {
                self.set_session(None, AuthChangeEvent::SignedOut);
                None
            }
        }
    }

    /// Bearer for a data call, renewing an expired session first.
    async fn fresh_bearer(&self, config: &BackendConfig) -> String {
        let renewal = renewal_for(self.session().as_ref(), http::now_secs(), false);
        self.renew(config, renewal).await;
        self.bearer(config)
    }

    /// Turn a non-OK data reply into an error. A 401 also refreshes or drops
    /// the session so the signed-in identity follows the backend.
    async fn data_failure(&self, config: &BackendConfig, reply: &http::Reply) -> DataError {
        if reply.status == UNAUTHORIZED {
            let renewal = renewal_for(self.session().as_ref(), http::now_secs(), true);
            self.renew(config, renewal).await;
        }
        DataError::Rejected(super::error::backend_error_message(reply.status, &reply.body))
    }
}

#[async_trait::async_trait(?Send)]
impl AuthBackend for SupabaseClient {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let config = self.config().ok_or(AuthError::Unavailable)?;
            let stored = self
                .session()
                .or_else(crate::util::storage::load_session);
            let Some(stored) = stored else {
                return Ok(None);
            };
            *self.inner.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(stored.clone());
            match renewal_for(Some(&stored), http::now_secs(), false) {
                Renewal::Keep => Ok(Some(stored)),
                renewal => Ok(self.renew(&config, renewal).await),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }

    fn on_auth_change(&self, listener: AuthListener) -> Subscription {
        self.inner.events.subscribe(listener)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let config = self.config().ok_or(AuthError::Unavailable)?;
            let request = http::authorized(
                gloo_net::http::Request::post(&token_endpoint(&config.supabase_url, "password")),
                &config.supabase_anon_key,
                &config.supabase_anon_key,
            )
            .json(&serde_json::json!({ "email": email, "password": password }));
            let reply = http::send(request).await.map_err(AuthError::Network)?;
            if !reply.ok {
                return Err(AuthError::Rejected(super::error::backend_error_message(reply.status, &reply.body)));
            }
            let session = session_from_token_response(reply.body, http::now_secs())?;
            self.set_session(Some(session.clone()), AuthChangeEvent::SignedIn);
            Ok(session)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AuthError::Unavailable)
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let config = self.config().ok_or(AuthError::Unavailable)?;
            let request = http::authorized(
                gloo_net::http::Request::post(&signup_endpoint(&config.supabase_url)),
                &config.supabase_anon_key,
                &config.supabase_anon_key,
            )
            .json(&serde_json::json!({ "email": email, "password": password }));
            let reply = http::send(request).await.map_err(AuthError::Network)?;
            if !reply.ok {
                return Err(AuthError::Rejected(super::error::backend_error_message(reply.status, &reply.body)));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AuthError::Unavailable)
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let config = self.config().ok_or(AuthError::Unavailable)?;
            let result = match self.session() {
                Some(session) => {
                    let request = http::authorized(
                        gloo_net::http::Request::post(&logout_endpoint(&config.supabase_url)),
                        &config.supabase_anon_key,
                        &session.access_token,
                    )
                    .build();
                    match http::send(request).await {
                        Ok(reply) if reply.ok => Ok(()),
                        Ok(reply) => Err(AuthError::Rejected(super::error::backend_error_message(
                            reply.status,
                            &reply.body,
                        ))),
                        Err(e) => Err(AuthError::Network(e)),
                    }
                }
                None => Ok(()),
            };
            // The local session goes away even when revocation fails.
            self.set_session(None, AuthChangeEvent::SignedOut);
            result
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }
}

#[async_trait::async_trait(?Send)]
impl ItemTable for SupabaseClient {
    async fn list(&self) -> Result<Vec<Item>, DataError> {
        #[cfg(feature = "hydrate")]
        {
            let config = self.config().ok_or(DataError::Unavailable)?;
            let request = http::authorized(
                gloo_net::http::Request::get(&items_list_endpoint(&config.supabase_url)),
                &config.supabase_anon_key,
                &self.fresh_bearer(&config).await,
            )
            .build();
            let reply = http::send(request).await.map_err(DataError::Network)?;
            if !reply.ok {
                return Err(self.data_failure(&config, &reply).await);
            }
            serde_json::from_value(reply.body).map_err(|e| DataError::Rejected(format!("unexpected data response: {e}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(DataError::Unavailable)
        }
    }

    async fn insert(&self, item: &NewItem) -> Result<Item, DataError> {
        #[cfg(feature = "hydrate")]
        {
            let config = self.config().ok_or(DataError::Unavailable)?;
            let request = http::authorized(
                gloo_net::http::Request::post(&items_insert_endpoint(&config.supabase_url)),
                &config.supabase_anon_key,
                &self.fresh_bearer(&config).await,
            )
            .header("Prefer", "return=representation")
            .json(item);
            let reply = http::send(request).await.map_err(DataError::Network)?;
            if !reply.ok {
                return Err(self.data_failure(&config, &reply).await);
            }
            first_row(reply.body)?.ok_or_else(|| DataError::Rejected("insert returned no row".to_owned()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = item;
            Err(DataError::Unavailable)
        }
    }

    async fn mark_resolved(&self, id: &str) -> Result<Item, DataError> {
        #[cfg(feature = "hydrate")]
        {
            let config = self.config().ok_or(DataError::Unavailable)?;
            let request = http::authorized(
                gloo_net::http::Request::patch(&item_update_endpoint(&config.supabase_url, id)),
                &config.supabase_anon_key,
                &self.fresh_bearer(&config).await,
            )
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "resolved": true }));
            let reply = http::send(request).await.map_err(DataError::Network)?;
            if !reply.ok {
                return Err(self.data_failure(&config, &reply).await);
            }
            first_row(reply.body)?.ok_or_else(|| DataError::NotFound(id.to_owned()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(DataError::Unavailable)
        }
    }
}
