//! Pure helpers behind the pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guard decisions, form state, item drafts, and the background simulation
//! live here so they can be unit-tested without a browser. `storage` is the
//! one module that touches `web-sys`.

pub mod auth;
pub mod form;
pub mod item_draft;
pub mod magnet_lines;
pub mod storage;
