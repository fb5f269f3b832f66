//! Figures derived from the backend's dashboard statistics.
//!
//! The backend reports raw counts; rates, averages and the per-day
//! registration table are computed here for the dashboard and analytics
//! pages.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use wecare_core::{BookingStatus, Rupees, UserRole};

use crate::api::{BookingCounts, DashboardStats, UserTrendPoint};

/// `part / total` as a percentage with one decimal place, or `"0"` when
/// there is nothing to divide by.
#[must_use]
pub fn percentage(part: u64, total: u64) -> String {
    if total == 0 {
        return "0".to_string();
    }
    let pct = Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(total);
    let pct = pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{pct:.1}")
}

/// Share of bookings that completed.
#[must_use]
pub fn completion_rate(bookings: &BookingCounts) -> String {
    percentage(bookings.completed, bookings.total)
}

/// Share of bookings that were cancelled.
#[must_use]
pub fn cancellation_rate(bookings: &BookingCounts) -> String {
    percentage(bookings.cancelled, bookings.total)
}

/// Total revenue spread over completed bookings, in whole rupees.
#[must_use]
pub fn average_booking_value(stats: &DashboardStats) -> Rupees {
    stats.revenue.total.average_over(stats.bookings.completed)
}

/// Nannies who have passed verification.
#[must_use]
pub const fn active_nannies(stats: &DashboardStats) -> u64 {
    stats
        .users
        .total_nannies
        .saturating_sub(stats.users.pending_nannies)
}

/// Parent and nanny sign-ups for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDay {
    pub date: String,
    pub parents: u64,
    pub nannies: u64,
}

/// Fold the backend's (day, role) registration counts into one row per day,
/// oldest first. Admin registrations are not charted.
#[must_use]
pub fn registrations_by_day(points: &[UserTrendPoint]) -> Vec<RegistrationDay> {
    let mut days: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for point in points {
        let entry = days.entry(point.key.date.as_str()).or_default();
        match point.key.role {
            UserRole::Parent => entry.0 += point.count,
            UserRole::Nanny => entry.1 += point.count,
            UserRole::Admin => {}
        }
    }
    days.into_iter()
        .map(|(date, (parents, nannies))| RegistrationDay {
            date: date.to_string(),
            parents,
            nannies,
        })
        .collect()
}

/// One slice of the booking status breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusShare {
    pub status: BookingStatus,
    pub count: u64,
    pub percent: String,
}

/// Pending, confirmed, completed and cancelled counts, leaving out empty
/// slices.
#[must_use]
pub fn status_distribution(bookings: &BookingCounts) -> Vec<StatusShare> {
    let slices = [
        (BookingStatus::Pending, bookings.pending),
        (BookingStatus::Confirmed, bookings.confirmed),
        (BookingStatus::Completed, bookings.completed),
        (BookingStatus::Cancelled, bookings.cancelled),
    ];
    let shown: u64 = slices.iter().map(|(_, n)| n).sum();
    slices
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(status, count)| StatusShare {
            status,
            count,
            percent: percentage(count, shown),
        })
        .collect()
}
