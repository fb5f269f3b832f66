//! Push notification dispatch.

use serde::Serialize;
use tracing::instrument;

use wecare_core::{Notification, NotificationTarget, UserRole};

use super::{Ack, ApiError, BackendClient};

/// Screen the mobile app opens when a direct notification is tapped.
const DIRECT_NOTIFICATION_SCREEN: &str = "Dashboard";

#[derive(Serialize)]
struct NotificationData {
    screen: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendToUser<'a> {
    user_id: &'a str,
    title: &'a str,
    body: &'a str,
    data: NotificationData,
}

#[derive(Serialize)]
struct SendToRole<'a> {
    title: &'a str,
    body: &'a str,
    role: UserRole,
}

#[derive(Serialize)]
struct Broadcast<'a> {
    title: &'a str,
    body: &'a str,
}

impl BackendClient {
    /// Dispatch a validated notification through exactly one endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or the call fails. Nothing is
    /// retried.
    #[instrument(skip(self, notification), fields(target = ?notification.target()))]
    pub async fn send_notification(&self, notification: &Notification) -> Result<Ack, ApiError> {
        let title = notification.title();
        let body = notification.body();
        match notification.target() {
            NotificationTarget::User(user_id) => {
                let request = SendToUser {
                    user_id: user_id.as_str(),
                    title,
                    body,
                    data: NotificationData {
                        screen: DIRECT_NOTIFICATION_SCREEN,
                    },
                };
                self.post("/notifications/send-to-user", &request).await
            }
            NotificationTarget::Role(role) => {
                let request = SendToRole {
                    title,
                    body,
                    role: *role,
                };
                self.post("/notifications/send-to-role", &request).await
            }
            NotificationTarget::Broadcast => {
                self.post("/notifications/broadcast", &Broadcast { title, body })
                    .await
            }
        }
    }
}
