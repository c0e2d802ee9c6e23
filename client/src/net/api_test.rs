use super::*;

#[test]
fn config_failed_message_formats_status() {
    assert_eq!(config_failed_message(503), "config request failed: 503");
}

#[test]
fn fetch_backend_config_is_unavailable_outside_the_browser() {
    let result = futures::executor::block_on(fetch_backend_config());
    assert_eq!(result, Err("not available on server".to_owned()));
}

#[test]
fn backend_config_matches_server_payload() {
    let raw = serde_json::json!({ "supabase_url": "https://p.supabase.co", "supabase_anon_key": "anon" });
    let cfg: BackendConfig = serde_json::from_value(raw).unwrap();
    assert_eq!(cfg.supabase_url, "https://p.supabase.co");
    assert_eq!(cfg.supabase_anon_key, "anon");
}
