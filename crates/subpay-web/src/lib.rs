//! subpay Web Frontend
//!
//! Leptos-based WASM storefront: pick a plan and payment mode, hand off to
//! the gateway's hosted checkout page, and reconcile the result on return.

mod api;
mod app;
mod components;
mod outcome;
mod pages;
mod receipt;
mod session;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
