//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and the route guard while reading shared
//! state from Leptos context providers.

pub mod app_shell;
pub mod private_route;
pub mod snackbar;
