//! Security PIN type.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Errors that can occur when parsing a [`SecurityPin`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    #[error("PIN is required")]
    Empty,
    #[error("PIN must be exactly {len} digits")]
    InvalidFormat { len: usize },
}

/// A 4-digit login PIN.
///
/// Held as a [`SecretString`] so it never shows up in `Debug` output or logs.
/// Call [`SecurityPin::expose`] only at the point it goes on the wire.
#[derive(Clone)]
pub struct SecurityPin(SecretString);

impl SecurityPin {
    pub const LENGTH: usize = 4;

    /// Parse a PIN, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the PIN is blank or not exactly four ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PinError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PinError::Empty);
        }
        if s.len() != Self::LENGTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PinError::InvalidFormat { len: Self::LENGTH });
        }
        Ok(Self(SecretString::from(s.to_owned())))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SecurityPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecurityPin([REDACTED])")
    }
}
