//! Newtype IDs for type-safe entity references.
//!
//! The backend identifies documents by MongoDB object ids (24 hex chars), but
//! the admin panel only ever echoes them back, so any non-empty alphanumeric
//! token is accepted. Use the `define_id!` macro to create wrappers that
//! prevent accidentally mixing ids from different entity types.

/// Error returned when an id fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The id is empty or whitespace.
    #[error("id cannot be empty")]
    Empty,
    /// The id contains characters that are not ASCII alphanumeric.
    #[error("id must be alphanumeric: {0}")]
    InvalidCharacters(String),
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `parse()` that rejects empty and non-alphanumeric input (ids are
///   interpolated into backend URL paths)
/// - `as_str()` and `Display`
///
/// # Example
///
/// ```rust
/// # use wecare_core::define_id;
/// define_id!(UserId);
/// define_id!(BookingId);
///
/// let user_id = UserId::parse("65f1c0ffee0123456789abcd").unwrap();
/// assert_eq!(user_id.as_str(), "65f1c0ffee0123456789abcd");
///
/// // These are different types, so this won't compile:
/// // let _: BookingId = user_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse an id, rejecting empty or non-alphanumeric input.
            ///
            /// # Errors
            ///
            /// Returns [`IdError`]($crate::types::id::IdError) when the input is
            /// blank or contains anything other than ASCII letters and digits.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::types::id::IdError> {
                let s = s.trim();
                if s.is_empty() {
                    return Err($crate::types::id::IdError::Empty);
                }
                if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err($crate::types::id::IdError::InvalidCharacters(s.to_owned()));
                }
                Ok(Self(s.to_owned()))
            }

            /// Get the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(UserId);
define_id!(AdminId);
define_id!(BookingId);
define_id!(ProviderId);
define_id!(ReviewId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let id = UserId::parse("65f1c0ffee0123456789abcd").unwrap();
        assert_eq!(id.to_string(), "65f1c0ffee0123456789abcd");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = BookingId::parse("  abc123 ").unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(ProviderId::parse("   "), Err(IdError::Empty));
    }

    #[test]
    fn test_parse_rejects_path_characters() {
        assert!(matches!(
            UserId::parse("abc/../admin"),
            Err(IdError::InvalidCharacters(_))
        ));
        assert!(UserId::parse("abc?x=1").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id: UserId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
