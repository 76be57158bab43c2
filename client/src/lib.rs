//! LexGenie browser app: case manager and document assistant.
//!
//! Built twice: with `ssr` for the server render and with `hydrate` for the
//! WASM bundle that takes over in the browser.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
