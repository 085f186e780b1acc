//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles authenticated REST calls and 401 interception, and `types`
//! defines the inventory wire schema.

pub mod api;
pub mod types;
