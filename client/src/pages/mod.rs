//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (form state, fetches,
//! navigation) and keeps list math in `util::table` and validation in pure
//! helpers so both can be tested natively.

pub mod dashboard;
pub mod login;
pub mod products;
pub mod signup;
