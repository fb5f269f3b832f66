//! Phone number type.
//!
//! WeCare accounts are keyed by phone number, stored in E.164-ish form
//! (`+919999999999`). Admin forms are forgiving about spaces and dashes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("phone number is required")]
    Empty,
    #[error("phone number may only contain digits and a leading +")]
    InvalidCharacters,
    #[error("phone number must have between {min} and {max} digits")]
    BadLength { min: usize, max: usize },
}

/// A normalized phone number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub const MIN_DIGITS: usize = 10;
    pub const MAX_DIGITS: usize = 15;

    /// Parse a phone number, stripping spaces and dashes.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is left after normalization, if anything
    /// other than digits (and one leading `+`) remains, or if the digit count
    /// is outside 10..=15.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if normalized.is_empty() {
            return Err(PhoneError::Empty);
        }

        let digits = normalized.strip_prefix('+').unwrap_or(&normalized);
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacters);
        }
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(PhoneError::BadLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_e164() {
        let phone = PhoneNumber::parse("+919999999999").unwrap();
        assert_eq!(phone.as_str(), "+919999999999");
    }

    #[test]
    fn test_parse_strips_separators() {
        let phone = PhoneNumber::parse(" +91 99999-99999 ").unwrap();
        assert_eq!(phone.as_str(), "+919999999999");
    }

    #[test]
    fn test_parse_without_plus() {
        assert!(PhoneNumber::parse("9999999999").is_ok());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(PhoneNumber::parse("  "), Err(PhoneError::Empty));
        assert_eq!(
            PhoneNumber::parse("+91abc9999999"),
            Err(PhoneError::InvalidCharacters)
        );
        assert_eq!(
            PhoneNumber::parse("++919999999999"),
            Err(PhoneError::InvalidCharacters)
        );
        assert!(matches!(
            PhoneNumber::parse("12345"),
            Err(PhoneError::BadLength { .. })
        ));
    }
}
