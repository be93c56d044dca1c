//! Shared domain types for the Aurora dashboard backend.
//!
//! Zero internal dependencies so the storage, events, and API crates can all
//! build on it.

pub mod activity;
pub mod error;
pub mod types;
