//! Process configuration read from the environment.
//!
//! `.env` is loaded by `main` before this runs, so local development can
//! keep the Supabase project settings out of the shell.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use lostfound_client::net::types::BackendConfig;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("SUPABASE_URL must be an http(s) URL: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Project URL without a trailing `/`.
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl AppConfig {
    /// Read `PORT`, `SUPABASE_URL`, and `SUPABASE_ANON_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required key is missing or malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match non_blank(lookup("PORT")) {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
        };

        let url = non_blank(lookup("SUPABASE_URL")).ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(url));
        }
        let supabase_url = url.trim_end_matches('/').to_owned();

        let supabase_anon_key =
            non_blank(lookup("SUPABASE_ANON_KEY")).ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;

        Ok(Self { port, supabase_url, supabase_anon_key })
    }

    /// The subset the browser needs to talk to Supabase directly.
    #[must_use]
    pub fn backend(&self) -> BackendConfig {
        BackendConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
