//! Session-related types for admin authentication.

use serde::{Deserialize, Serialize};

use wecare_core::{AdminId, UserRole};

use crate::api::AdminProfile;

/// Session-stored admin identity.
///
/// Written once at login and read back only through the auth extractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Backend user id of the admin.
    pub id: AdminId,
    pub name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub role: UserRole,
}

impl CurrentAdmin {
    /// First letter of the admin's name, upper-cased, for the header avatar.
    #[must_use]
    pub fn initial(&self) -> char {
        self.name
            .trim()
            .chars()
            .next()
            .map_or('A', |c| c.to_ascii_uppercase())
    }

    /// Name to show, falling back to "Admin" when the profile has none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { "Admin" } else { name }
    }
}

impl From<AdminProfile> for CurrentAdmin {
    fn from(profile: AdminProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name.unwrap_or_default(),
            phone_number: profile.phone_number,
            email: profile.email,
            role: profile.role,
        }
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
