//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the board chrome and item cards while reading shared
//! stores from Leptos context providers.

pub mod item_form;
pub mod item_grid;
pub mod magnet_lines_background;
pub mod protected_route;
