//! WeCare backend REST client.
//!
//! Every backend response is wrapped in an envelope:
//!
//! ```json
//! { "success": true, "message": "optional", ...payload }
//! ```
//!
//! The client decodes the envelope first. `success: false` becomes
//! [`ApiError::Backend`] carrying the backend's message verbatim; otherwise the
//! whole object is decoded into the endpoint's typed payload, and a shape
//! mismatch is a [`ApiError::Decode`] error rather than a silent default.
//!
//! Endpoint methods are grouped by resource in the submodules. Mutations only
//! accept validated values from [`wecare_core`] (`BookingTransition`,
//! `ProviderVerification`, `Notification`, ...), so an invalid request cannot
//! be built in the first place.
//!
//! No timeout or retry is configured: a hung backend call leaves that one page
//! waiting, and a failure is reported once.

mod admin;
mod bookings;
mod error;
mod notifications;
mod providers;
mod reviews;
pub mod types;
mod users;

pub use admin::NewAdmin;
pub use error::{ApiError, CONNECT_MESSAGE};
pub use providers::ProviderQueue;
pub use types::*;
pub use users::UserUpdate;

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

/// Acknowledgement of a mutation. Only the optional message is of interest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the WeCare backend API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    /// API base without a trailing slash, e.g. `http://localhost:7090/api`.
    base: String,
    /// Server root `/health` (outside the `/api` prefix).
    health_url: String,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base", &self.inner.base)
            .finish_non_exhaustive()
    }
}

impl BackendClient {
    /// Create a client for the API rooted at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Connect`] if the HTTP client fails to build.
    pub fn new(api_url: &Url) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("wecare-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Connect)?;

        let base = api_url.as_str().trim_end_matches('/').to_string();
        let health_url = format!("{}/health", server_root(&base));

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base,
                health_url,
            }),
        })
    }

    /// The configured API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path).query(query);
        self.execute(path, request).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.request(Method::POST, path).json(body);
        self.execute(path, request).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let mut request = self.request(Method::PUT, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(path, request).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::DELETE, path);
        self.execute(path, request).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.inner.base);
        self.inner.client.request(method, url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(ApiError::Connect)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::Connect)?;

        let result = decode_envelope(endpoint, status, &body);
        if let Err(e) = &result {
            tracing::warn!(endpoint, status = status.as_u16(), error = %e, "backend call failed");
        }
        result
    }

    /// Probe the backend's liveness endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers with
    /// something other than a health document.
    #[tracing::instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let endpoint = "/health";
        let response = self
            .inner
            .client
            .get(&self.inner.health_url)
            .send()
            .await
            .map_err(ApiError::Connect)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::Connect)?;

        serde_json::from_slice(&body).map_err(|e| {
            if status.is_success() {
                ApiError::Decode {
                    endpoint: endpoint.to_string(),
                    message: e.to_string(),
                }
            } else {
                ApiError::Status {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                }
            }
        })
    }
}

/// Server root for an API base: a trailing `/api` segment is dropped.
fn server_root(base: &str) -> &str {
    base.strip_suffix("/api").unwrap_or(base)
}

/// Decode a backend envelope into `T`.
fn decode_envelope<T: DeserializeOwned>(
    endpoint: &str,
    status: StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) if status.is_success() => {
            return Err(ApiError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            });
        }
        Err(_) => {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
    };

    let success = value
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or_else(|| status.is_success());
    if !success {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(ApiError::Backend(message));
    }

    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        count: u32,
    }

    #[test]
    fn test_decode_success_payload() {
        let body = br#"{"success": true, "count": 3}"#;
        let p: Payload = decode_envelope("/x", StatusCode::OK, body).unwrap();
        assert_eq!(p.count, 3);
    }

    #[test]
    fn test_decode_failure_keeps_message_verbatim() {
        let body = br#"{"success": false, "message": "Invalid PIN"}"#;
        let err =
            decode_envelope::<Payload>("/admin/login", StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(matches!(&err, ApiError::Backend(m) if m == "Invalid PIN"));
    }

    #[test]
    fn test_decode_failure_with_http_200() {
        let body = br#"{"success": false, "message": "Nanny not found"}"#;
        let err = decode_envelope::<Payload>("/x", StatusCode::OK, body).unwrap_err();
        assert_eq!(err.user_message(), "Nanny not found");
    }

    #[test]
    fn test_decode_shape_mismatch_is_an_error() {
        let body = br#"{"success": true, "count": "three"}"#;
        let err = decode_envelope::<Payload>("/x", StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn test_decode_non_json_error_page() {
        let body = b"<html>bad gateway</html>";
        let err = decode_envelope::<Payload>("/x", StatusCode::BAD_GATEWAY, body).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 502, .. }));
    }

    #[test]
    fn test_missing_success_follows_http_status() {
        let p: Payload = decode_envelope("/x", StatusCode::OK, br#"{"count": 1}"#).unwrap();
        assert_eq!(p.count, 1);
        let body = br#"{"message": "Route not found"}"#;
        let err = decode_envelope::<Payload>("/x", StatusCode::NOT_FOUND, body).unwrap_err();
        assert_eq!(err.user_message(), "Route not found");
    }

    #[test]
    fn test_server_root() {
        assert_eq!(server_root("http://localhost:7090/api"), "http://localhost:7090");
        assert_eq!(server_root("https://api.wecare.in"), "https://api.wecare.in");
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let url = Url::parse("http://localhost:7090/api/").unwrap();
        let client = BackendClient::new(&url).unwrap();
        assert_eq!(client.base_url(), "http://localhost:7090/api");
        assert_eq!(client.inner.health_url, "http://localhost:7090/health");
    }
}
