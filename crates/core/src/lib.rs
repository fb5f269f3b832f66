//! WeCare Core - Shared domain types for the admin panel.
//!
//! This crate provides the types used across all WeCare admin components:
//! - `admin` - Server-rendered administration panel
//! - `cli` - Command-line tools (database seeding, health checks)
//!
//! # Architecture
//!
//! The core crate contains only types and rules - no I/O, no database access,
//! no HTTP clients. Everything here can be unit tested without a backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, phone numbers, PINs, emails, money and statuses
//! - [`workflow`] - Booking status and provider/nanny verification transitions
//! - [`listing`] - Paginated list queries (search, filter, page navigation)
//! - [`notification`] - Push notification drafts and their validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod listing;
pub mod notification;
pub mod types;
pub mod workflow;

pub use listing::{ListFilter, ListQuery, NoFilter, PAGE_SIZE, Pagination, QUEUE_SIZE};
pub use notification::{
    ComposerMode, Notification, NotificationDraft, NotificationError, NotificationTarget,
    QUICK_TEMPLATES, QuickTemplate,
};
pub use types::*;
pub use workflow::{
    BookingAction, BookingTransition, NannyDecision, NannyVerification, ProviderDecision,
    ProviderVerification, TransitionError, parse_price,
};
