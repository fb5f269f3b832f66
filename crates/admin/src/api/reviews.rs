//! Review endpoints.

use tracing::instrument;

use wecare_core::{ListQuery, NoFilter};

use super::types::ReviewPage;
use super::{ApiError, BackendClient};

impl BackendClient {
    /// One page of reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the page does not decode.
    #[instrument(skip(self))]
    pub async fn list_reviews(&self, query: &ListQuery<NoFilter>) -> Result<ReviewPage, ApiError> {
        self.get("/admin/reviews", &query.to_params()).await
    }
}
