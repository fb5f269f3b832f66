//! Booking endpoints.

use serde::Serialize;
use tracing::instrument;

use wecare_core::{BookingId, BookingStatus, BookingTransition, ListQuery};

use super::types::{Booking, BookingEnvelope, BookingPage};
use super::{Ack, ApiError, BackendClient};

#[derive(Serialize)]
struct StatusRequest<'a> {
    status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl BackendClient {
    /// One page of bookings, filtered by status and booking-id search.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the page does not decode.
    #[instrument(skip(self))]
    pub async fn list_bookings(
        &self,
        query: &ListQuery<BookingStatus>,
    ) -> Result<BookingPage, ApiError> {
        self.get("/admin/bookings", &query.to_params()).await
    }

    /// A single booking with populated parent and nanny.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist or the call fails.
    #[instrument(skip(self))]
    pub async fn booking(&self, id: &BookingId) -> Result<Booking, ApiError> {
        let envelope: BookingEnvelope = self.get(&format!("/admin/bookings/{id}"), &[]).await?;
        Ok(envelope.booking)
    }

    /// Apply a validated status transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses (e.g. the booking moved on in
    /// the meantime) or the call fails.
    #[instrument(skip(self))]
    pub async fn update_booking_status(
        &self,
        id: &BookingId,
        transition: &BookingTransition,
    ) -> Result<Ack, ApiError> {
        let body = StatusRequest {
            status: transition.target(),
            reason: transition.reason(),
        };
        self.put(&format!("/admin/bookings/{id}/status"), Some(&body))
            .await
    }
}
