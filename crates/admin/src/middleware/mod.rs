//! HTTP middleware for the admin panel.
//!
//! Sessions are held in memory by `tower-sessions`; the auth extractors are
//! the only code that reads the admin identity back out of the session.

pub mod auth;
pub mod session;

pub use auth::{OptionalAdminAuth, RequireAdminAuth, clear_current_admin, set_current_admin};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
