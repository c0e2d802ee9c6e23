//! Public backend settings for the browser.

use axum::Json;
use axum::extract::State;
use lostfound_client::net::types::BackendConfig;

use crate::state::AppState;

/// `GET /api/config`: Supabase URL and anon key. Both are public by design
/// of Supabase; row-level security on the project guards the data.
pub async fn backend_config(State(state): State<AppState>) -> Json<BackendConfig> {
    Json(state.config.backend())
}
