//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    #[error("email must have text on both sides of the @")]
    MissingPart,
}

/// An email address, structurally checked.
///
/// Email is optional everywhere in WeCare (accounts are keyed by phone
/// number), so forms go through [`Email::parse_optional`], which maps a
/// blank field to `None` instead of an error.
///
/// ```
/// use wecare_core::Email;
///
/// assert!(Email::parse("admin@wecare.com").is_ok());
/// assert!(Email::parse("@wecare.com").is_err());
/// assert_eq!(Email::parse_optional("  ").unwrap(), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, too long, has no `@`, or has
    /// nothing before or after it.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if local.is_empty() || domain.is_empty() {
            return Err(EmailError::MissingPart);
        }
        Ok(Self(s.to_owned()))
    }

    /// Parse an optional form field: blank means "no email".
    ///
    /// # Errors
    ///
    /// Returns an error if the field is non-blank and not a valid email.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, EmailError> {
        if s.trim().is_empty() {
            Ok(None)
        } else {
            Self::parse(s).map(Some)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Email::parse("admin@wecare.com").is_ok());
        assert!(Email::parse("priya.sharma+nanny@example.co.in").is_ok());
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(Email::parse("  a@b.in ").unwrap().as_str(), "a@b.in");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("no-at"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::parse("@wecare.com"), Err(EmailError::MissingPart));
        assert_eq!(Email::parse("admin@"), Err(EmailError::MissingPart));
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(Email::parse(&long), Err(EmailError::TooLong { .. })));
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(Email::parse_optional("").unwrap(), None);
        assert_eq!(
            Email::parse_optional("x@y.z").unwrap().map(|e| e.to_string()),
            Some("x@y.z".to_owned())
        );
        assert!(Email::parse_optional("bad").is_err());
    }
}
