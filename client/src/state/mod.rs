//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `notify`) so individual components can
//! depend on small focused models. Each is provided once by `App` as a
//! `Copy` context handle wrapping an `RwSignal`.

pub mod auth;
pub mod notify;
