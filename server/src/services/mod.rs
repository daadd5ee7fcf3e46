//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the catalog, the in-memory session map, and its expiry
//! sweep, so route handlers stay focused on protocol translation.

pub mod catalog;
pub mod reaper;
pub mod session;
