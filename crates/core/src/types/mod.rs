//! Core types for WeCare.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod phone;
pub mod pin;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::Rupees;
pub use phone::{PhoneError, PhoneNumber};
pub use pin::{PinError, SecurityPin};
pub use status::*;
