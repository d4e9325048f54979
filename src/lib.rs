//! Binday - Bin Collection Reminders
//!
//! Browser front-end for the bin-collection reminder service, built with
//! Leptos and WebAssembly. All business data lives behind a remote API;
//! this crate owns the session: token storage, login/logout, route gating
//! and the session-scoped profile queries.

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
