//! Typed payloads returned by the WeCare backend.
//!
//! Field names follow the backend's camelCase JSON. Required fields are the
//! ones the panel cannot render without (ids, roles, statuses); everything
//! else defaults so that older documents still decode.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wecare_core::{
    AdminId, BookingId, BookingStatus, Pagination, ProviderId, ProviderKind, ReviewId, Rupees,
    UserId, UserRole, VerificationStatus,
};

// =============================================================================
// Admin
// =============================================================================

/// Admin identity returned by login and create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(alias = "_id")]
    pub id: AdminId,
    #[serde(default)]
    pub name: Option<String>,
    pub phone_number: String,
    #[serde(default = "default_admin_role")]
    pub role: UserRole,
    #[serde(default)]
    pub email: Option<String>,
}

const fn default_admin_role() -> UserRole {
    UserRole::Admin
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub tag: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub formatted_address: Option<String>,
}

impl Address {
    /// One-line rendering: the formatted address if present, else the parts.
    #[must_use]
    pub fn one_line(&self) -> String {
        if let Some(formatted) = self.formatted_address.as_deref().filter(|s| !s.is_empty()) {
            return formatted.to_string();
        }
        [&self.street, &self.city, &self.state, &self.pincode]
            .into_iter()
            .filter_map(|part| part.as_deref().filter(|s| !s.is_empty()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NannyProfile {
    #[serde(default)]
    pub experience: Decimal,
    pub hourly_rate: Option<Rupees>,
    #[serde(default)]
    pub rating: Decimal,
    #[serde(default)]
    pub total_jobs_completed: u64,
    #[serde(default)]
    pub total_earnings: Rupees,
    #[serde(default)]
    pub is_verified_nanny: bool,
    #[serde(default)]
    pub skills: Vec<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub phone_number: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_deactivated: bool,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    pub nanny_profile: Option<NannyProfile>,
}

impl User {
    /// Nanny profile, only for accounts whose role is nanny.
    #[must_use]
    pub fn nanny(&self) -> Option<&NannyProfile> {
        if self.role == UserRole::Nanny {
            self.nanny_profile.as_ref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPage {
    pub users: Vec<User>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBookingStats {
    #[serde(default)]
    pub total_bookings: u64,
    #[serde(default)]
    pub completed_bookings: u64,
    #[serde(default)]
    pub cancelled_bookings: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub user: User,
    #[serde(default)]
    pub booking_stats: UserBookingStats,
    #[serde(default)]
    pub recent_bookings: Vec<Booking>,
}

// =============================================================================
// Bookings
// =============================================================================

/// A reference to another document that may or may not be populated.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Populated(T),
    Id(String),
}

impl<T> Ref<T> {
    #[must_use]
    pub const fn populated(&self) -> Option<&T> {
        match self {
            Self::Populated(inner) => Some(inner),
            Self::Id(_) => None,
        }
    }
}

/// A populated parent or nanny on a booking or review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

/// Name of a person reference, or `fallback` if unknown.
#[must_use]
pub fn person_name(person: Option<&Ref<Person>>, fallback: &str) -> String {
    person
        .and_then(Ref::populated)
        .and_then(|p| p.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Phone number of a person reference, if populated.
#[must_use]
pub fn person_phone(person: Option<&Ref<Person>>) -> Option<String> {
    person
        .and_then(Ref::populated)
        .and_then(|p| p.phone_number.clone())
}

fn default_payment_method() -> String {
    "cash".to_string()
}

fn default_payment_status() -> String {
    "pending".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    #[serde(default = "default_payment_method")]
    pub method: String,
    #[serde(default = "default_payment_status")]
    pub status: String,
}

impl Default for Payment {
    fn default() -> Self {
        Self {
            method: default_payment_method(),
            status: default_payment_status(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: BookingId,
    #[serde(default)]
    pub booking_id: String,
    pub parent_id: Option<Ref<Person>>,
    pub nanny_id: Option<Ref<Person>>,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub total_hours: Decimal,
    #[serde(default)]
    pub hourly_rate: Rupees,
    #[serde(default)]
    pub total_amount: Rupees,
    pub status: BookingStatus,
    pub address: Option<Address>,
    pub payment: Option<Payment>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// `hourlyRate × totalHours`, what `totalAmount` should be.
    #[must_use]
    pub fn expected_total(&self) -> Rupees {
        self.hourly_rate * self.total_hours
    }

    #[must_use]
    pub fn payment(&self) -> Payment {
        self.payment.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BookingEnvelope {
    pub booking: Booking,
}

// =============================================================================
// Reviews
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedBooking {
    pub booking_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ReviewId,
    pub rating: u8,
    pub comment: Option<String>,
    pub parent_id: Option<Ref<Person>>,
    pub nanny_id: Option<Ref<Person>>,
    pub booking_id: Option<Ref<ReviewedBooking>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Rating clamped to the 1..=5 star scale.
    #[must_use]
    pub fn stars(&self) -> u8 {
        self.rating.clamp(1, 5)
    }

    /// Human booking id (`WC12345678`) if the booking was populated.
    #[must_use]
    pub fn booking_code(&self) -> Option<String> {
        self.booking_id
            .as_ref()
            .and_then(Ref::populated)
            .and_then(|b| b.booking_id.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub pagination: Pagination,
}

// =============================================================================
// Providers
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Daycare {
    #[serde(rename = "_id")]
    pub id: ProviderId,
    pub center_name: Option<String>,
    pub owner_name: Option<String>,
    pub total_capacity: Option<u32>,
    pub phone_number: Option<String>,
    pub address: Option<Address>,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    pub admin_estimated_price: Option<Rupees>,
    pub rejection_reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElderCare {
    #[serde(rename = "_id")]
    pub id: ProviderId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub experience: Option<Decimal>,
    pub phone_number: Option<String>,
    pub address: Option<Address>,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    pub admin_estimated_price: Option<Rupees>,
    pub rejection_reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A daycare center or an elder-care caregiver.
#[derive(Debug, Clone)]
pub enum Provider {
    Daycare(Daycare),
    ElderCare(ElderCare),
}

impl Provider {
    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        match self {
            Self::Daycare(_) => ProviderKind::Daycare,
            Self::ElderCare(_) => ProviderKind::Eldercare,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ProviderId {
        match self {
            Self::Daycare(d) => &d.id,
            Self::ElderCare(e) => &e.id,
        }
    }

    /// Center name for daycares, caregiver name for elder care.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Daycare(d) => d.center_name.as_deref(),
            Self::ElderCare(e) => e.name.as_deref(),
        }
    }

    #[must_use]
    pub fn owner_name(&self) -> Option<&str> {
        match self {
            Self::Daycare(d) => d.owner_name.as_deref(),
            Self::ElderCare(_) => None,
        }
    }

    #[must_use]
    pub fn phone_number(&self) -> Option<&str> {
        match self {
            Self::Daycare(d) => d.phone_number.as_deref(),
            Self::ElderCare(e) => e.phone_number.as_deref(),
        }
    }

    #[must_use]
    pub const fn address(&self) -> Option<&Address> {
        match self {
            Self::Daycare(d) => d.address.as_ref(),
            Self::ElderCare(e) => e.address.as_ref(),
        }
    }

    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.address().and_then(|a| a.city.as_deref())
    }

    #[must_use]
    pub const fn verification_status(&self) -> VerificationStatus {
        match self {
            Self::Daycare(d) => d.verification_status,
            Self::ElderCare(e) => e.verification_status,
        }
    }

    #[must_use]
    pub const fn estimated_price(&self) -> Option<Rupees> {
        match self {
            Self::Daycare(d) => d.admin_estimated_price,
            Self::ElderCare(e) => e.admin_estimated_price,
        }
    }

    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Daycare(d) => d.rejection_reason.as_deref(),
            Self::ElderCare(e) => e.rejection_reason.as_deref(),
        }
    }

    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Daycare(d) => d.created_at,
            Self::ElderCare(e) => e.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProviderData<T> {
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PendingProviders<T> {
    #[serde(default = "Vec::new")]
    pub providers: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DaycareList {
    #[serde(default)]
    pub daycares: Vec<Daycare>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ElderCareList {
    #[serde(default)]
    pub caregivers: Vec<ElderCare>,
}

// =============================================================================
// Stats
// =============================================================================

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total: u64,
    pub total_parents: u64,
    pub total_nannies: u64,
    pub pending_nannies: u64,
    pub new_users_today: u64,
    pub new_users_week: u64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct BookingCounts {
    pub total: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub today: u64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RevenueStats {
    pub total: Rupees,
    pub month: Rupees,
    pub week: Rupees,
}

/// Bookings and revenue for one day (`_id` is `YYYY-MM-DD`).
#[derive(Debug, Clone, Deserialize)]
pub struct BookingTrendPoint {
    #[serde(rename = "_id")]
    pub date: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub revenue: Rupees,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserTrendKey {
    pub date: String,
    pub role: UserRole,
}

/// Registrations for one (day, role) pair.
#[derive(Debug, Clone, Deserialize)]
pub struct UserTrendPoint {
    #[serde(rename = "_id")]
    pub key: UserTrendKey,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub users: UserStats,
    pub bookings: BookingCounts,
    #[serde(default)]
    pub revenue: RevenueStats,
    #[serde(default)]
    pub booking_trend: Vec<BookingTrendPoint>,
    #[serde(default)]
    pub user_trend: Vec<UserTrendPoint>,
    #[serde(default)]
    pub top_nannies: Vec<User>,
    #[serde(default)]
    pub recent_bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatsEnvelope {
    pub stats: DashboardStats,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AdminEnvelope {
    pub admin: AdminProfile,
}

/// Backend liveness check.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: Option<String>,
}

impl HealthStatus {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_with_populated_refs() {
        let booking: Booking = serde_json::from_value(json!({
            "_id": "b1",
            "bookingId": "WC12345678",
            "parentId": {"_id": "p1", "name": "Anita", "phoneNumber": "+911111111111"},
            "nannyId": "n1",
            "date": "2025-03-01T00:00:00.000Z",
            "startTime": "09:00",
            "endTime": "13:00",
            "totalHours": 4,
            "hourlyRate": 250,
            "totalAmount": 1000,
            "status": "in-progress",
            "createdAt": "2025-02-27T10:15:00.000Z"
        }))
        .unwrap();

        assert_eq!(booking.status, BookingStatus::InProgress);
        assert_eq!(person_name(booking.parent_id.as_ref(), "Parent"), "Anita");
        assert_eq!(person_name(booking.nanny_id.as_ref(), "Nanny"), "Nanny");
        assert_eq!(booking.expected_total(), booking.total_amount);
        let payment = booking.payment();
        assert_eq!(payment.method, "cash");
        assert_eq!(payment.status, "pending");
    }

    #[test]
    fn test_booking_rejects_unknown_status() {
        let result = serde_json::from_value::<Booking>(json!({"_id": "b1", "status": "archived"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_provider_without_status_is_pending() {
        let daycare: Daycare = serde_json::from_value(json!({
            "_id": "d1",
            "centerName": "Little Stars",
            "address": {"city": "Pune"}
        }))
        .unwrap();
        let provider = Provider::Daycare(daycare);
        assert_eq!(provider.verification_status(), VerificationStatus::Pending);
        assert_eq!(provider.display_name(), Some("Little Stars"));
        assert_eq!(provider.city(), Some("Pune"));
        assert_eq!(provider.kind(), ProviderKind::Daycare);
    }

    #[test]
    fn test_nanny_profile_only_for_nannies() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1",
            "phoneNumber": "+919000000000",
            "role": "parent",
            "nannyProfile": {"rating": 4.5}
        }))
        .unwrap();
        assert!(user.nanny().is_none());
    }

    #[test]
    fn test_stats_tolerates_missing_sections() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "users": {"total": 10, "pendingNannies": 2},
            "bookings": {"total": 4, "completed": 1}
        }))
        .unwrap();
        assert_eq!(stats.users.pending_nannies, 2);
        assert_eq!(stats.revenue.total, Rupees::ZERO);
        assert!(stats.booking_trend.is_empty());
    }

    #[test]
    fn test_address_one_line() {
        let addr = Address {
            street: Some("12 MG Road".into()),
            city: Some("Bengaluru".into()),
            pincode: Some("560001".into()),
            ..Address::default()
        };
        assert_eq!(addr.one_line(), "12 MG Road, Bengaluru, 560001");
    }

    #[test]
    fn test_admin_profile_accepts_id_or_underscore_id() {
        let a: AdminProfile =
            serde_json::from_value(json!({"id": "a1", "phoneNumber": "+919999999999"})).unwrap();
        assert_eq!(a.role, UserRole::Admin);
        let b: AdminProfile = serde_json::from_value(json!({
            "_id": "a2",
            "phoneNumber": "+919999999999",
            "role": "admin"
        }))
        .unwrap();
        assert_eq!(b.id.as_str(), "a2");
    }
}
