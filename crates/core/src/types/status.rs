//! Status enums for various entities.
//!
//! Wire names follow the backend's JSON (`lowercase`, with the single
//! `in-progress` exception on bookings).

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a status string from a form or query is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownStatus {
    kind: &'static str,
    value: String,
}

impl UnknownStatus {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Parent,
    Nanny,
    Admin,
}

impl UserRole {
    pub const ALL: [Self; 3] = [Self::Parent, Self::Nanny, Self::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Nanny => "nanny",
            Self::Admin => "admin",
        }
    }

    /// Plural label used in filters and cohort pickers ("Parents").
    #[must_use]
    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::Parent => "Parents",
            Self::Nanny => "Nannies",
            Self::Admin => "Admins",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownStatus::new("role", s))
    }
}

/// Booking lifecycle status.
///
/// Admin-initiated transitions live in [`crate::workflow`]; `in-progress`,
/// `completed` and `rejected` are only ever entered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    Rejected,
}

impl BookingStatus {
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
        Self::Rejected,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Rejected => "Rejected",
        }
    }

    /// No further transition, admin or external, leaves these states.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Rejected)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownStatus::new("booking status", s))
    }
}

/// Provider (daycare / elder care) verification status.
///
/// Records created before verification existed have no status at all; those
/// are treated as pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two provider categories that go through price-setting approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Daycare,
    Eldercare,
}

impl ProviderKind {
    pub const ALL: [Self; 2] = [Self::Daycare, Self::Eldercare];

    /// Path segment under `/providers/` on the backend and the panel.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daycare => "daycare",
            Self::Eldercare => "eldercare",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daycare => "Daycare",
            Self::Eldercare => "Elder Care",
        }
    }

    /// Unit the admin-estimated price is quoted in.
    #[must_use]
    pub const fn price_unit(self) -> &'static str {
        match self {
            Self::Daycare => "month",
            Self::Eldercare => "hour",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownStatus::new("provider kind", s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_wire_names() {
        let s: BookingStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(s, BookingStatus::InProgress);
        assert_eq!(
            serde_json::to_string(&BookingStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_booking_status_rejects_unknown() {
        assert!(serde_json::from_str::<BookingStatus>("\"archived\"").is_err());
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_booking_status_from_str_matches_wire() {
        for status in BookingStatus::ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(!BookingStatus::InProgress.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_verification_status_default_is_pending() {
        #[derive(Deserialize)]
        struct Doc {
            #[serde(default)]
            status: VerificationStatus,
        }
        let doc: Doc = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.status, VerificationStatus::Pending);
        assert!(!doc.status.is_decided());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("nanny".parse::<UserRole>().unwrap(), UserRole::Nanny);
        assert!("Nanny".parse::<UserRole>().is_err());
        assert_eq!(UserRole::Parent.plural_label(), "Parents");
    }

    #[test]
    fn test_provider_kind_path_segment() {
        assert_eq!("eldercare".parse::<ProviderKind>().unwrap(), ProviderKind::Eldercare);
        assert_eq!(ProviderKind::Daycare.to_string(), "daycare");
        assert_eq!(ProviderKind::Eldercare.price_unit(), "hour");
    }
}
