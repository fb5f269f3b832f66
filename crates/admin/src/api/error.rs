//! Errors from the WeCare backend client.

use thiserror::Error;

/// Shown when the backend cannot be reached at all.
pub const CONNECT_MESSAGE: &str = "Cannot connect to server";

/// Errors that can occur when calling the WeCare backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, reset).
    #[error("transport error: {0}")]
    Connect(#[source] reqwest::Error),

    /// The backend answered `success: false`. The message is shown verbatim.
    #[error("backend rejected request: {0}")]
    Backend(String),

    /// The payload did not match the expected shape.
    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Non-JSON error response (proxy error page, 404 from a wrong base URL).
    #[error("HTTP {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },
}

impl ApiError {
    /// Message suitable for showing to the admin.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.user_message_or("Request failed")
    }

    /// Like [`ApiError::user_message`], with `fallback` used when the backend
    /// rejected the request without saying why.
    #[must_use]
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            Self::Connect(_) => CONNECT_MESSAGE.to_string(),
            Self::Backend(message) if message.trim().is_empty() => fallback.to_string(),
            Self::Backend(message) => message.clone(),
            Self::Decode { .. } => "Unexpected response from server".to_string(),
            Self::Status { status, .. } => format!("Server error (HTTP {status})"),
        }
    }

    /// Transport and protocol failures, as opposed to a business rejection.
    #[must_use]
    pub const fn is_server_fault(&self) -> bool {
        !matches!(self, Self::Backend(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_is_verbatim() {
        let err = ApiError::Backend("Booking already cancelled".to_string());
        assert_eq!(err.user_message(), "Booking already cancelled");
        assert!(!err.is_server_fault());
    }

    #[test]
    fn test_blank_backend_message_uses_fallback() {
        let err = ApiError::Backend(String::new());
        assert_eq!(err.user_message_or("Login failed"), "Login failed");
        assert_eq!(err.user_message(), "Request failed");
    }

    #[test]
    fn test_status_and_decode_messages() {
        let err = ApiError::Status {
            endpoint: "/admin/stats".to_string(),
            status: 502,
        };
        assert_eq!(err.user_message(), "Server error (HTTP 502)");
        assert!(err.is_server_fault());

        let err = ApiError::Decode {
            endpoint: "/admin/stats".to_string(),
            message: "missing field `users`".to_string(),
        };
        assert_eq!(err.user_message(), "Unexpected response from server");
        assert!(err.to_string().contains("missing field"));
    }
}
