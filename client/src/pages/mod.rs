//! Route-level page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page reads the session and item stores from context. Only the index
//! page sits behind the route guard.

pub mod index;
pub mod login;
pub mod not_found;
pub mod signup;
