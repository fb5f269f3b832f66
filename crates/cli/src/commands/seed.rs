//! Seed the first admin account.
//!
//! The backend only lets an existing admin create another, so the very first
//! one is written straight into the `users` collection.
//!
//! # Environment Variables
//!
//! - `MONGODB_URI` - MongoDB connection string (default: `mongodb://localhost:27017/wecare`)

use mongodb::Client;
use mongodb::bson::{DateTime, Document, doc};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use wecare_core::{Email, EmailError, PhoneError, PhoneNumber, PinError, SecurityPin, UserRole};

/// Database used when the connection string names none.
const DEFAULT_DATABASE: &str = "wecare";

/// Collection holding every account, admins included.
const USERS_COLLECTION: &str = "users";

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Phone number failed validation.
    #[error("Invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// PIN failed validation.
    #[error("Invalid PIN: {0}")]
    InvalidPin(#[from] PinError),

    /// Email failed validation.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// A validated admin account to insert.
#[derive(Debug)]
pub struct AdminSeed {
    pub phone_number: PhoneNumber,
    pub name: String,
    pub email: Option<Email>,
    pub pin: SecurityPin,
}

impl AdminSeed {
    /// Validate command-line values.
    ///
    /// # Errors
    ///
    /// Returns an error if the phone number, PIN or email is malformed.
    pub fn parse(phone: &str, name: &str, email: &str, pin: &str) -> Result<Self, SeedError> {
        Ok(Self {
            phone_number: PhoneNumber::parse(phone)?,
            name: name.trim().to_owned(),
            email: Email::parse_optional(email)?,
            pin: SecurityPin::parse(pin)?,
        })
    }

    /// The user document as the backend stores it.
    fn to_document(&self, now: DateTime) -> Document {
        let mut document = doc! {
            "phoneNumber": self.phone_number.as_str(),
            "name": self.name.as_str(),
            "role": UserRole::Admin.as_str(),
            "isVerified": true,
            "isProfileComplete": true,
            "privacySettings": {
                "securityPin": self.pin.expose(),
                "pushNotifications": true,
            },
            "createdAt": now,
            "updatedAt": now,
        };
        if let Some(email) = &self.email {
            document.insert("email", email.as_str());
        }
        document
    }
}

/// Insert the admin unless an admin already exists.
///
/// # Errors
///
/// Returns an error if MongoDB cannot be reached or the insert fails.
pub async fn admin(mongodb_uri: &SecretString, seed: &AdminSeed) -> Result<(), SeedError> {
    tracing::info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(mongodb_uri.expose_secret()).await?;
    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
    let users = database.collection::<Document>(USERS_COLLECTION);

    if let Some(existing) = users
        .find_one(doc! { "role": UserRole::Admin.as_str() })
        .await?
    {
        tracing::warn!(
            "Admin already exists: {} ({})",
            existing.get_str("name").unwrap_or("unnamed"),
            existing.get_str("phoneNumber").unwrap_or("no phone"),
        );
        tracing::info!("Nothing to do; sign in with the existing admin's credentials.");
        return Ok(());
    }

    users.insert_one(seed.to_document(DateTime::now())).await?;

    tracing::info!("Admin created successfully!");
    tracing::info!("Login credentials:");
    tracing::info!("  Phone: {}", seed.phone_number);
    tracing::info!("  PIN: {}", seed.pin.expose());

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validates_credentials() {
        assert!(matches!(
            AdminSeed::parse("12", "Ops", "", "1234"),
            Err(SeedError::InvalidPhone(_))
        ));
        assert!(matches!(
            AdminSeed::parse("+919999999999", "Ops", "", "12345"),
            Err(SeedError::InvalidPin(_))
        ));
        assert!(matches!(
            AdminSeed::parse("+919999999999", "Ops", "not-an-email", "1234"),
            Err(SeedError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_document_shape() {
        let seed =
            AdminSeed::parse("+91 99999 99999", " WeCare Admin ", "admin@wecare.com", "1234")
                .unwrap();
        let now = DateTime::from_millis(1_760_000_000_000);
        let document = seed.to_document(now);

        assert_eq!(document.get_str("phoneNumber").unwrap(), "+919999999999");
        assert_eq!(document.get_str("name").unwrap(), "WeCare Admin");
        assert_eq!(document.get_str("role").unwrap(), "admin");
        assert_eq!(document.get_str("email").unwrap(), "admin@wecare.com");
        assert!(document.get_bool("isVerified").unwrap());
        let privacy = document.get_document("privacySettings").unwrap();
        assert_eq!(privacy.get_str("securityPin").unwrap(), "1234");
        assert!(privacy.get_bool("pushNotifications").unwrap());
        assert_eq!(document.get_datetime("createdAt").unwrap(), &now);
    }

    #[test]
    fn test_document_without_email() {
        let seed = AdminSeed::parse("+919999999999", "Ops", "", "1234").unwrap();
        let document = seed.to_document(DateTime::now());
        assert!(!document.contains_key("email"));
    }
}
