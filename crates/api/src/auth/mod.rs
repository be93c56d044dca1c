//! Session authentication primitives.
//!
//! - [`session`] -- session token generation and verification.
//! - [`cookie`] -- reading the session cookie and expiring it on logout.

pub mod cookie;
pub mod session;
