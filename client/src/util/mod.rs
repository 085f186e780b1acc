//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and pure table math
//! from page and component logic to improve reuse and testability.

pub mod storage;
pub mod table;
