use super::*;
use crate::net::types::{AuthChangeEvent, ItemKind};
use futures::executor::block_on;
use std::sync::atomic::{AtomicUsize, Ordering};

const BASE: &str = "https://proj.supabase.co";

fn config() -> BackendConfig {
    BackendConfig { supabase_url: format!("{BASE}/"), supabase_anon_key: "anon".to_owned() }
}

// =============================================================
// Endpoints
// =============================================================

#[test]
fn auth_endpoints_format_expected_paths() {
    assert_eq!(token_endpoint(BASE, "password"), "https://proj.supabase.co/auth/v1/token?grant_type=password");
    assert_eq!(
        token_endpoint(BASE, "refresh_token"),
        "https://proj.supabase.co/auth/v1/token?grant_type=refresh_token"
    );
    assert_eq!(signup_endpoint(BASE), "https://proj.supabase.co/auth/v1/signup");
    assert_eq!(logout_endpoint(BASE), "https://proj.supabase.co/auth/v1/logout");
}

#[test]
fn item_endpoints_format_expected_paths() {
    assert_eq!(
        items_list_endpoint(BASE),
        "https://proj.supabase.co/rest/v1/items?select=*&order=created_at.desc"
    );
    assert_eq!(items_insert_endpoint(BASE), "https://proj.supabase.co/rest/v1/items");
    assert_eq!(item_update_endpoint(BASE, "42"), "https://proj.supabase.co/rest/v1/items?id=eq.42");
}

// =============================================================
// Response parsing
// =============================================================

#[test]
fn token_response_derives_expiry_from_expires_in() {
    let body = serde_json::json!({
        "access_token": "abc",
        "expires_in": 3600,
        "refresh_token": "r1",
        "user": { "id": "u1", "email": "a@x.edu" }
    });
    let session = session_from_token_response(body, 1_000).unwrap();
    assert_eq!(session.expires_at, Some(4_600));
    assert_eq!(session.user.id, "u1");
}

#[test]
fn token_response_keeps_explicit_expiry() {
    let body = serde_json::json!({
        "access_token": "abc",
        "expires_in": 3600,
        "expires_at": 99,
        "user": { "id": "u1" }
    });
    let session = session_from_token_response(body, 1_000).unwrap();
    assert_eq!(session.expires_at, Some(99));
}

#[test]
fn token_response_without_user_is_rejected() {
    let err = session_from_token_response(serde_json::json!({ "access_token": "abc" }), 0).unwrap_err();
    assert!(matches!(err, AuthError::Rejected(msg) if msg.starts_with("unexpected auth response")));
}

#[test]
fn first_row_returns_first_representation() {
    let body = serde_json::json!([
        { "id": "7", "type": "lost", "description": "wallet", "resolved": true, "created_by": "u1" }
    ]);
    let row = first_row(body).unwrap().unwrap();
    assert_eq!(row.id, "7");
    assert_eq!(row.kind, ItemKind::Lost);
    assert!(row.resolved);
}

#[test]
fn first_row_of_empty_array_is_none() {
    assert!(first_row(serde_json::json!([])).unwrap().is_none());
}

#[test]
fn first_row_of_non_array_is_rejected() {
    assert!(first_row(serde_json::json!({ "id": "7" })).is_err());
}

// =============================================================
// Client state
// =============================================================

#[test]
fn configure_trims_trailing_slash() {
    let client = SupabaseClient::new();
    assert!(!client.is_configured());
    client.configure(config());
    assert!(client.is_configured());
    assert_eq!(client.config().unwrap().supabase_url, BASE);
}

#[test]
fn bearer_falls_back_to_anon_key_when_signed_out() {
    let client = SupabaseClient::new();
    client.configure(config());
    let cfg = client.config().unwrap();
    assert_eq!(client.bearer(&cfg), "anon");
}

#[test]
fn calls_report_unavailable_outside_the_browser() {
    let client = SupabaseClient::new();
    client.configure(config());
    assert_eq!(block_on(client.current_session()), Err(AuthError::Unavailable));
    assert_eq!(block_on(client.sign_in_with_password("a@x.edu", "pw")), Err(AuthError::Unavailable));
    assert_eq!(block_on(client.list()), Err(DataError::Unavailable));
}

#[test]
fn clones_share_auth_listeners() {
    let client = SupabaseClient::new();
    let clone = client.clone();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_cb = Arc::clone(&hits);
    let _sub = client.on_auth_change(Arc::new(move |_event: AuthChangeEvent, _session: Option<&Session>| {
        hits_cb.fetch_add(1, Ordering::SeqCst);
    }));
    clone.inner.events.emit(AuthChangeEvent::SignedOut, None);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn first_row_accepts_numeric_id() {
    let body = serde_json::json!([{ "id": 12, "type": "found", "resolved": true }]);
    let row = first_row(body).unwrap().unwrap();
    assert_eq!(row.id, "12");
}

// =============================================================
// Session renewal
// =============================================================

fn expiring_session(expires_at: i64, refresh_token: Option<&str>) -> Session {
    let mut session = crate::net::fake::session("u1", "a@x.edu");
    session.expires_at = Some(expires_at);
    session.refresh_token = refresh_token.map(str::to_owned);
    session
}

#[test]
fn renewal_keeps_signed_out_client_on_anon_key() {
    assert_eq!(renewal_for(None, 5_000, false), Renewal::Keep);
    assert_eq!(renewal_for(None, 5_000, true), Renewal::Keep);
}

#[test]
fn renewal_keeps_live_session() {
    let session = expiring_session(10_000, Some("r1"));
    assert_eq!(renewal_for(Some(&session), 5_000, false), Renewal::Keep);
}

#[test]
fn renewal_refreshes_expired_session_mid_tab() {
    let session = expiring_session(3_600, Some("r1"));
    assert_eq!(renewal_for(Some(&session), 3_601, false), Renewal::Refresh("r1".to_owned()));
}

#[test]
fn renewal_signs_out_expired_session_without_refresh_token() {
    let session = expiring_session(3_600, None);
    assert_eq!(renewal_for(Some(&session), 3_601, false), Renewal::SignOut);
    let blank = expiring_session(3_600, Some(""));
    assert_eq!(renewal_for(Some(&blank), 3_601, false), Renewal::SignOut);
}

#[test]
fn renewal_after_rejected_token_refreshes_even_before_expiry() {
    let session = expiring_session(10_000, Some("r1"));
    assert_eq!(renewal_for(Some(&session), 5_000, true), Renewal::Refresh("r1".to_owned()));
    let no_refresh = expiring_session(10_000, None);
    assert_eq!(renewal_for(Some(&no_refresh), 5_000, true), Renewal::SignOut);
}
