//! Daycare and elder-care provider endpoints.

use serde::Serialize;
use tracing::instrument;

use wecare_core::{
    ProviderId, ProviderKind, ProviderVerification, QUEUE_SIZE, Rupees, VerificationStatus,
};

use super::types::{
    Daycare, DaycareList, ElderCare, ElderCareList, PendingProviders, Provider, ProviderData,
};
use super::{Ack, ApiError, BackendClient};

/// Which provider list to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderQueue {
    /// The public directory (approved providers), up to 100.
    Listed,
    /// Providers awaiting admin review.
    Pending,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    admin_estimated_price: Option<Rupees>,
}

impl BackendClient {
    /// Fetch one provider list for one provider kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the list does not decode.
    #[instrument(skip(self))]
    pub async fn list_providers(
        &self,
        kind: ProviderKind,
        queue: ProviderQueue,
    ) -> Result<Vec<Provider>, ApiError> {
        let limit = [("limit", QUEUE_SIZE.to_string())];
        let providers = match (kind, queue) {
            (ProviderKind::Daycare, ProviderQueue::Listed) => {
                let res: ProviderData<DaycareList> = self.get("/providers/daycare", &limit).await?;
                res.data.daycares.into_iter().map(Provider::Daycare).collect()
            }
            (ProviderKind::Daycare, ProviderQueue::Pending) => {
                let res: ProviderData<PendingProviders<Daycare>> =
                    self.get("/providers/daycare/pending/list", &[]).await?;
                res.data.providers.into_iter().map(Provider::Daycare).collect()
            }
            (ProviderKind::Eldercare, ProviderQueue::Listed) => {
                let res: ProviderData<ElderCareList> =
                    self.get("/providers/eldercare", &limit).await?;
                res.data.caregivers.into_iter().map(Provider::ElderCare).collect()
            }
            (ProviderKind::Eldercare, ProviderQueue::Pending) => {
                let res: ProviderData<PendingProviders<ElderCare>> =
                    self.get("/providers/eldercare/pending/list", &[]).await?;
                res.data.providers.into_iter().map(Provider::ElderCare).collect()
            }
        };
        Ok(providers)
    }

    /// Approve or reject a provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or the call fails.
    #[instrument(skip(self))]
    pub async fn verify_provider(
        &self,
        kind: ProviderKind,
        id: &ProviderId,
        verification: &ProviderVerification,
    ) -> Result<Ack, ApiError> {
        let body = VerifyRequest {
            status: verification.status(),
            rejection_reason: verification.rejection_reason(),
            admin_estimated_price: verification.estimated_price(),
        };
        self.put(&format!("/providers/{kind}/{id}/verify"), Some(&body))
            .await
    }
}
