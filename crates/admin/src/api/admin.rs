//! Admin authentication, admin accounts and platform statistics.

use serde::Serialize;
use tracing::instrument;

use wecare_core::{AdminId, Email, PhoneNumber, SecurityPin};

use super::types::{AdminEnvelope, AdminProfile, DashboardStats, StatsEnvelope};
use super::{ApiError, BackendClient};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    phone_number: &'a str,
    pin: &'a str,
}

/// A new administrator account, validated.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub phone_number: PhoneNumber,
    pub name: String,
    pub email: Option<Email>,
    pub pin: SecurityPin,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAdminRequest<'a> {
    admin_id: &'a str,
    phone_number: &'a str,
    name: &'a str,
    email: &'a str,
    pin: &'a str,
}

impl BackendClient {
    /// Log in with phone number and PIN.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Backend`] with the backend's reason on bad
    /// credentials, or a transport / decode error.
    #[instrument(skip(self, pin), fields(phone = %phone_number))]
    pub async fn login(
        &self,
        phone_number: &PhoneNumber,
        pin: &SecurityPin,
    ) -> Result<AdminProfile, ApiError> {
        let body = LoginRequest {
            phone_number: phone_number.as_str(),
            pin: pin.expose(),
        };
        let envelope: AdminEnvelope = self.post("/admin/login", &body).await?;
        Ok(envelope.admin)
    }

    /// Create another administrator on behalf of `creator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses (duplicate phone, creator not
    /// an admin) or the call fails.
    #[instrument(skip(self, admin), fields(phone = %admin.phone_number))]
    pub async fn create_admin(
        &self,
        creator: &AdminId,
        admin: &NewAdmin,
    ) -> Result<AdminProfile, ApiError> {
        let body = CreateAdminRequest {
            admin_id: creator.as_str(),
            phone_number: admin.phone_number.as_str(),
            name: &admin.name,
            email: admin.email.as_ref().map_or("", Email::as_str),
            pin: admin.pin.expose(),
        };
        let envelope: AdminEnvelope = self.post("/admin/create", &body).await?;
        Ok(envelope.admin)
    }

    /// Aggregated platform statistics for the dashboard and analytics pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the stats do not decode.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        let envelope: StatsEnvelope = self.get("/admin/stats", &[]).await?;
        Ok(envelope.stats)
    }
}
