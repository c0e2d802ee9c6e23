//! Networking modules for the managed backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `backend` defines the auth and item-table contracts, `supabase` implements
//! them over HTTP, `api` talks to this app's own server, and `types` defines
//! the shared wire schema.

pub mod api;
pub mod backend;
pub mod error;
pub mod supabase;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;
