//! Booking status and verification transitions.
//!
//! Every admin-initiated state change is represented by a value that can only
//! be constructed when the last-known state allows the change and any required
//! payload (cancellation reason, estimated price) is present. The API client
//! accepts only these values, so an invalid request never leaves the panel.
//!
//! ```text
//! booking:   pending   -> confirmed  (Confirm)
//!            pending   -> cancelled  (Cancel + reason)
//!            confirmed -> cancelled  (Cancel + reason)
//! provider:  pending   -> approved   (Approve + price > 0)
//!            pending   -> rejected   (Reject, optional reason)
//! nanny:     unverified -> verified | dropped from queue
//! ```
//!
//! Nothing here guards against concurrent admins: the backend is the only
//! arbiter and the panel re-fetches after every mutation.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{BookingStatus, Rupees, UnknownStatus, VerificationStatus};

/// Why a requested transition was refused before reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {action} a booking that is {from}")]
    BookingActionNotAllowed {
        from: BookingStatus,
        action: BookingAction,
    },
    #[error("a cancellation reason is required")]
    ReasonRequired,
    #[error("provider is already {0}")]
    AlreadyDecided(VerificationStatus),
    #[error("an estimated price is required to approve this provider")]
    PriceRequired,
    #[error("estimated price must be greater than zero")]
    PriceNotPositive,
    #[error("not a valid price: {0}")]
    InvalidPrice(String),
    #[error("nanny is already verified")]
    NannyAlreadyVerified,
}

/// An admin action on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    Confirm,
    Cancel,
}

impl BookingAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Confirm => "Confirm Booking",
            Self::Cancel => "Cancel Booking",
        }
    }

    /// Status the booking moves to when the action succeeds.
    #[must_use]
    pub const fn target(self) -> BookingStatus {
        match self {
            Self::Confirm => BookingStatus::Confirmed,
            Self::Cancel => BookingStatus::Cancelled,
        }
    }

    #[must_use]
    pub const fn requires_reason(self) -> bool {
        matches!(self, Self::Cancel)
    }
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingAction {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirm" => Ok(Self::Confirm),
            "cancel" => Ok(Self::Cancel),
            other => Err(UnknownStatus::new("booking action", other)),
        }
    }
}

impl BookingStatus {
    /// Actions an admin may take from this status.
    ///
    /// `in-progress` offers nothing: it only moves to `completed`, and the
    /// backend does that.
    #[must_use]
    pub const fn admin_actions(self) -> &'static [BookingAction] {
        match self {
            Self::Pending => &[BookingAction::Confirm, BookingAction::Cancel],
            Self::Confirmed => &[BookingAction::Cancel],
            Self::InProgress | Self::Completed | Self::Cancelled | Self::Rejected => &[],
        }
    }

    #[must_use]
    pub fn allows(self, action: BookingAction) -> bool {
        self.admin_actions().contains(&action)
    }
}

/// Trim a free-text field, mapping blank input to `None`.
fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

/// A validated booking status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingTransition {
    target: BookingStatus,
    reason: Option<String>,
}

impl BookingTransition {
    /// Validate `action` against the booking's last-known status.
    ///
    /// A reason passed with `Confirm` is dropped.
    ///
    /// # Errors
    ///
    /// - [`TransitionError::BookingActionNotAllowed`] if `current` does not
    ///   offer `action`
    /// - [`TransitionError::ReasonRequired`] if cancelling with a blank reason
    pub fn new(
        current: BookingStatus,
        action: BookingAction,
        reason: Option<&str>,
    ) -> Result<Self, TransitionError> {
        if !current.allows(action) {
            return Err(TransitionError::BookingActionNotAllowed {
                from: current,
                action,
            });
        }

        let reason = if action.requires_reason() {
            Some(non_blank(reason).ok_or(TransitionError::ReasonRequired)?)
        } else {
            None
        };

        Ok(Self {
            target: action.target(),
            reason,
        })
    }

    #[must_use]
    pub const fn target(&self) -> BookingStatus {
        self.target
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Outcome of a provider review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderDecision {
    Approve { estimated_price: Rupees },
    Reject { reason: Option<String> },
}

/// A validated provider (daycare / elder care) verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderVerification {
    decision: ProviderDecision,
}

impl ProviderVerification {
    /// Approve a pending provider at an admin-estimated price.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is already decided, or the price is
    /// missing or not positive.
    pub fn approve(
        current: VerificationStatus,
        estimated_price: Option<Rupees>,
    ) -> Result<Self, TransitionError> {
        ensure_pending(current)?;
        let estimated_price = estimated_price.ok_or(TransitionError::PriceRequired)?;
        if !estimated_price.is_positive() {
            return Err(TransitionError::PriceNotPositive);
        }
        Ok(Self {
            decision: ProviderDecision::Approve { estimated_price },
        })
    }

    /// Reject a pending provider. A blank reason is sent as no reason.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::AlreadyDecided`] if the provider is not pending.
    pub fn reject(
        current: VerificationStatus,
        reason: Option<&str>,
    ) -> Result<Self, TransitionError> {
        ensure_pending(current)?;
        Ok(Self {
            decision: ProviderDecision::Reject {
                reason: non_blank(reason),
            },
        })
    }

    #[must_use]
    pub const fn decision(&self) -> &ProviderDecision {
        &self.decision
    }

    /// Status the provider moves to.
    #[must_use]
    pub const fn status(&self) -> VerificationStatus {
        match self.decision {
            ProviderDecision::Approve { .. } => VerificationStatus::Approved,
            ProviderDecision::Reject { .. } => VerificationStatus::Rejected,
        }
    }

    #[must_use]
    pub const fn estimated_price(&self) -> Option<Rupees> {
        match self.decision {
            ProviderDecision::Approve { estimated_price } => Some(estimated_price),
            ProviderDecision::Reject { .. } => None,
        }
    }

    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        match &self.decision {
            ProviderDecision::Reject { reason } => reason.as_deref(),
            ProviderDecision::Approve { .. } => None,
        }
    }
}

const fn ensure_pending(current: VerificationStatus) -> Result<(), TransitionError> {
    if current.is_decided() {
        Err(TransitionError::AlreadyDecided(current))
    } else {
        Ok(())
    }
}

/// Parse an estimated-price form field. Blank input is "no price".
///
/// # Errors
///
/// Returns [`TransitionError::InvalidPrice`] if the field is not a number.
pub fn parse_price(input: &str) -> Result<Option<Rupees>, TransitionError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(input)
        .map(|d| Some(Rupees::new(d)))
        .map_err(|_| TransitionError::InvalidPrice(input.to_owned()))
}

/// Outcome of a nanny review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NannyDecision {
    Approve,
    Reject,
}

impl FromStr for NannyDecision {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            other => Err(UnknownStatus::new("nanny decision", other)),
        }
    }
}

/// A validated nanny verification.
///
/// Nanny verification is a boolean on the account: rejecting does not leave
/// a "rejected" marker, the nanny simply drops out of the pending queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NannyVerification {
    approved: bool,
}

impl NannyVerification {
    /// Decide on a nanny whose last-known verified flag is `already_verified`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NannyAlreadyVerified`] if the nanny has
    /// already been verified.
    pub const fn new(
        already_verified: bool,
        decision: NannyDecision,
    ) -> Result<Self, TransitionError> {
        if already_verified {
            return Err(TransitionError::NannyAlreadyVerified);
        }
        Ok(Self {
            approved: matches!(decision, NannyDecision::Approve),
        })
    }

    #[must_use]
    pub const fn approved(self) -> bool {
        self.approved
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(n: i64) -> Option<Rupees> {
        Some(Rupees::new(Decimal::from(n)))
    }

    #[test]
    fn test_admin_actions_per_status() {
        use BookingAction::{Cancel, Confirm};
        assert_eq!(BookingStatus::Pending.admin_actions(), &[Confirm, Cancel]);
        assert_eq!(BookingStatus::Confirmed.admin_actions(), &[Cancel]);
        for status in [
            BookingStatus::InProgress,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::Rejected,
        ] {
            assert!(status.admin_actions().is_empty(), "{status} should offer nothing");
        }
    }

    #[test]
    fn test_confirm_pending() {
        let t =
            BookingTransition::new(BookingStatus::Pending, BookingAction::Confirm, None).unwrap();
        assert_eq!(t.target(), BookingStatus::Confirmed);
        assert_eq!(t.reason(), None);
    }

    #[test]
    fn test_confirm_drops_reason() {
        let t = BookingTransition::new(BookingStatus::Pending, BookingAction::Confirm, Some("x"))
            .unwrap();
        assert_eq!(t.reason(), None);
    }

    #[test]
    fn test_cancel_requires_reason() {
        for reason in [None, Some(""), Some("   \t")] {
            assert_eq!(
                BookingTransition::new(BookingStatus::Confirmed, BookingAction::Cancel, reason),
                Err(TransitionError::ReasonRequired)
            );
        }
    }

    #[test]
    fn test_cancel_with_reason_is_trimmed() {
        let t = BookingTransition::new(
            BookingStatus::Pending,
            BookingAction::Cancel,
            Some("  parent requested  "),
        )
        .unwrap();
        assert_eq!(t.target(), BookingStatus::Cancelled);
        assert_eq!(t.reason(), Some("parent requested"));
    }

    #[test]
    fn test_confirm_confirmed_is_refused() {
        let err = BookingTransition::new(BookingStatus::Confirmed, BookingAction::Confirm, None)
            .unwrap_err();
        assert!(matches!(err, TransitionError::BookingActionNotAllowed { .. }));
        assert_eq!(err.to_string(), "cannot confirm a booking that is confirmed");
    }

    #[test]
    fn test_terminal_bookings_refuse_everything() {
        for status in [
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::Rejected,
        ] {
            assert!(BookingTransition::new(status, BookingAction::Cancel, Some("late")).is_err());
        }
    }

    #[test]
    fn test_provider_approve_requires_price() {
        assert_eq!(
            ProviderVerification::approve(VerificationStatus::Pending, None),
            Err(TransitionError::PriceRequired)
        );
        assert_eq!(
            ProviderVerification::approve(VerificationStatus::Pending, price(0)),
            Err(TransitionError::PriceNotPositive)
        );
        assert_eq!(
            ProviderVerification::approve(VerificationStatus::Pending, price(-5)),
            Err(TransitionError::PriceNotPositive)
        );
    }

    #[test]
    fn test_provider_approve() {
        let v = ProviderVerification::approve(VerificationStatus::Pending, price(8000)).unwrap();
        assert_eq!(v.status(), VerificationStatus::Approved);
        assert_eq!(v.estimated_price(), price(8000));
        assert_eq!(v.rejection_reason(), None);
    }

    #[test]
    fn test_provider_reject_blank_reason_is_none() {
        let v = ProviderVerification::reject(VerificationStatus::Pending, Some("  ")).unwrap();
        assert_eq!(v.status(), VerificationStatus::Rejected);
        assert_eq!(v.rejection_reason(), None);
        assert_eq!(v.estimated_price(), None);

        let v = ProviderVerification::reject(VerificationStatus::Pending, Some("License expired"))
            .unwrap();
        assert_eq!(v.rejection_reason(), Some("License expired"));
    }

    #[test]
    fn test_provider_decided_is_terminal() {
        for current in [VerificationStatus::Approved, VerificationStatus::Rejected] {
            assert_eq!(
                ProviderVerification::approve(current, price(100)),
                Err(TransitionError::AlreadyDecided(current))
            );
            assert!(ProviderVerification::reject(current, None).is_err());
        }
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("").unwrap(), None);
        assert_eq!(parse_price(" 1500 ").unwrap(), price(1500));
        assert_eq!(
            parse_price("250.50").unwrap(),
            Some(Rupees::new(Decimal::new(25050, 2)))
        );
        assert!(matches!(parse_price("abc"), Err(TransitionError::InvalidPrice(_))));
    }

    #[test]
    fn test_nanny_verification() {
        assert!(NannyVerification::new(false, NannyDecision::Approve).unwrap().approved());
        assert!(!NannyVerification::new(false, NannyDecision::Reject).unwrap().approved());
        assert_eq!(
            NannyVerification::new(true, NannyDecision::Approve),
            Err(TransitionError::NannyAlreadyVerified)
        );
    }

    #[test]
    fn test_action_from_str() {
        assert_eq!("cancel".parse::<BookingAction>().unwrap(), BookingAction::Cancel);
        assert!("complete".parse::<BookingAction>().is_err());
        assert_eq!("reject".parse::<NannyDecision>().unwrap(), NannyDecision::Reject);
    }
}
