//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `items`) so views depend on small
//! focused stores. Stores write through [`cell::StateCell`], which is an
//! `RwSignal` in the running app.

pub mod cell;
pub mod items;
pub mod session;
