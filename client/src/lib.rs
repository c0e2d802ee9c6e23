//! # lostfound-client
//!
//! Leptos + WASM frontend for the campus lost & found board.
//!
//! This crate contains pages, components, the session and item stores, the
//! backend contracts with their Supabase implementation, and the decorative
//! canvas background. It renders on the server (`ssr`) and hydrates in the
//! browser (`hydrate`).

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs logging and hydrates the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
