//! Business logic on top of backend data.
//!
//! # Services
//!
//! - `metrics` - Rates, averages and trend tables for dashboard and analytics
//! - `providers` - Merging and searching the provider lists

pub mod metrics;
pub mod providers;
