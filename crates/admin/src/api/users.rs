//! User management endpoints.

use serde::Serialize;
use tracing::instrument;

use wecare_core::{Email, ListQuery, NannyVerification, QUEUE_SIZE, UserId, UserRole};

use super::types::{User, UserDetail, UserPage};
use super::{Ack, ApiError, BackendClient};

/// Profile fields an admin may edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}

#[derive(Serialize)]
struct VerifyNannyRequest {
    approved: bool,
}

impl BackendClient {
    /// One page of users, filtered by role and search text.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the page does not decode.
    #[instrument(skip(self))]
    pub async fn list_users(&self, query: &ListQuery<UserRole>) -> Result<UserPage, ApiError> {
        self.get("/admin/users", &query.to_params()).await
    }

    /// Nannies awaiting verification (`role=nanny&verified=false`).
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the page does not decode.
    #[instrument(skip(self))]
    pub async fn pending_nannies(&self) -> Result<Vec<User>, ApiError> {
        let query = ListQuery::new(QUEUE_SIZE).with_filter(Some(UserRole::Nanny));
        let mut params = query.to_params();
        params.push(("verified", "false".to_string()));
        let page: UserPage = self.get("/admin/users", &params).await?;
        Ok(page.users)
    }

    /// A user with booking statistics and recent bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the call fails.
    #[instrument(skip(self))]
    pub async fn user(&self, id: &UserId) -> Result<UserDetail, ApiError> {
        self.get(&format!("/admin/users/{id}"), &[]).await
    }

    /// Update a user's name and/or email.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or the call fails.
    #[instrument(skip(self))]
    pub async fn update_user(&self, id: &UserId, update: &UserUpdate) -> Result<Ack, ApiError> {
        self.put(&format!("/admin/users/{id}"), Some(update)).await
    }

    /// Flip a user's activation state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or the call fails.
    #[instrument(skip(self))]
    pub async fn toggle_user_status(&self, id: &UserId) -> Result<Ack, ApiError> {
        self.put::<Ack, ()>(&format!("/admin/users/{id}/toggle-status"), None)
            .await
    }

    /// Permanently delete a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or the call fails.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &UserId) -> Result<Ack, ApiError> {
        self.delete(&format!("/admin/users/{id}")).await
    }

    /// Approve or reject a nanny.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or the call fails.
    #[instrument(skip(self))]
    pub async fn verify_nanny(
        &self,
        id: &UserId,
        verification: NannyVerification,
    ) -> Result<Ack, ApiError> {
        let body = VerifyNannyRequest {
            approved: verification.approved(),
        };
        self.put(&format!("/admin/users/{id}/verify-nanny"), Some(&body))
            .await
    }
}
