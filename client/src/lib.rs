//! # client
//!
//! Leptos + WASM admin front end for the Stokio inventory tools.
//!
//! This crate contains pages, components, application state and the REST
//! client. Session handling (rehydration, login, logout, the route guard
//! decision) lives in the `session` crate; this crate injects it into the
//! view tree as an [`state::auth::AuthContext`] and backs it with browser
//! `localStorage`.
//!
//! Build for the browser with the `csr` feature (e.g. `trunk serve
//! --features csr`). Without it, browser glue compiles to inert stubs so the
//! crate's unit tests run natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init only fails if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
