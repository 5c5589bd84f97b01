// src/lib.rs
pub mod app;
pub mod client;
pub mod config;
pub mod models;
pub mod render;

#[cfg(target_arch = "wasm32")]
mod page;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// WASM entry point. Runs once when the module is loaded by the host page.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Initialize logger only once at the start
    console_log::init_with_level(log::Level::Debug).ok();

    page::start()
}
