//! Request guards.
//!
//! - [`session_gate::session_gate`] -- redirects cookie-less requests in the
//!   protected area to the login page.
//! - [`auth::AuthSession`] -- extracts the verified session user for handlers.

pub mod auth;
pub mod session_gate;
