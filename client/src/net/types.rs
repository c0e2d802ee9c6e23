//! Shared DTOs for the backend boundary.
//!
//! DESIGN
//! ======
//! These types mirror the managed backend's JSON so serde round-trips stay
//! lossless. `Identity` is the only type the rest of the UI reads for
//! "who is signed in"; everything else about a session stays in `net`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The signed-in user as the UI sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
}

impl Identity {
    /// Map a backend session onto the identity it proves.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self { id: session.user.id.clone(), email: session.user.email.clone() }
    }
}

/// User record embedded in a backend session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Backend-issued proof of authentication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds after which the access token is no longer accepted.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl Session {
    /// Whether the access token has expired at `now_secs`.
    #[must_use]
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now_secs)
    }
}

/// Reason attached to an auth-change notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthChangeEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// Whether a posting reports something lost or something found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Lost,
    Found,
}

impl ItemKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lost => "lost",
            Self::Found => "found",
        }
    }

    /// Parse a form value; anything other than `found` is a lost report.
    #[must_use]
    pub fn from_form_value(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("found") { Self::Found } else { Self::Lost }
    }
}

/// A lost/found posting as stored in the `items` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Text form of the row id; numeric `bigint` ids are accepted too.
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// RFC 3339 timestamp assigned by the backend.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub resolved: bool,
    /// Creator's identity id; absent for anonymous postings.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Row ids arrive as JSON strings (uuid) or integers (`bigint identity`).
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

/// Insert payload for a new posting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl NewItem {
    /// Stamp the creator when someone is signed in; otherwise leave the field as is.
    pub fn stamp_creator(&mut self, identity: Option<&Identity>) {
        if let Some(identity) = identity {
            self.created_by = Some(identity.id.clone());
        }
    }
}

/// Public backend settings served by `/api/config`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}
