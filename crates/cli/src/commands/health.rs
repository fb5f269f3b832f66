//! Backend health check.

use thiserror::Error;
use url::Url;

use wecare_admin::api::{ApiError, BackendClient};

/// Errors that can occur while probing the backend.
#[derive(Debug, Error)]
pub enum HealthError {
    #[error("Invalid API URL {0}: {1}")]
    InvalidUrl(String, url::ParseError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Backend reported status '{0}'")]
    Unhealthy(String),
}

/// Call the backend's `/health` endpoint and report the result.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the backend is unreachable, or it
/// reports anything other than `ok`.
pub async fn check(api_url: &str) -> Result<(), HealthError> {
    let url = Url::parse(api_url).map_err(|e| HealthError::InvalidUrl(api_url.to_owned(), e))?;
    let client = BackendClient::new(&url)?;

    let health = client.health().await?;
    if !health.is_ok() {
        return Err(HealthError::Unhealthy(health.status));
    }

    tracing::info!(
        timestamp = health.timestamp.as_deref().unwrap_or("-"),
        "Backend is healthy"
    );
    Ok(())
}
