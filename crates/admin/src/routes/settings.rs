//! Admin settings routes.
//!
//! Shows the signed-in admin's profile and the backend's health, and lets an
//! admin create another admin account.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use chrono::DateTime;
use serde::Deserialize;
use tracing::instrument;

use wecare_core::{Email, PhoneNumber, SecurityPin};

use crate::{
    api::{HealthStatus, NewAdmin},
    filters,
    middleware::RequireAdminAuth,
    models::CurrentAdmin,
    state::AppState,
};

use super::{
    capitalize, format, redirect_error, redirect_success, render,
    shell::{Flash, ShellView},
};

const BASE: &str = "/settings";

// =============================================================================
// Templates
// =============================================================================

/// Signed-in admin details.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub role: &'static str,
}

impl From<&CurrentAdmin> for ProfileView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.display_name().to_string(),
            phone_number: admin.phone_number.clone(),
            email: format::or_dash(admin.email.as_deref()),
            role: admin.role.as_str(),
        }
    }
}

/// Backend liveness as shown in the "Server Status" panel.
#[derive(Debug, Clone)]
pub struct ServerStatusView {
    pub online: bool,
    pub checked_at: Option<String>,
}

impl ServerStatusView {
    fn offline() -> Self {
        Self {
            online: false,
            checked_at: None,
        }
    }
}

impl From<&HealthStatus> for ServerStatusView {
    fn from(health: &HealthStatus) -> Self {
        Self {
            online: health.is_ok(),
            checked_at: health.timestamp.as_deref().map(|ts| {
                DateTime::parse_from_rfc3339(ts)
                    .map_or_else(|_| ts.to_string(), |t| t.format("%H:%M:%S").to_string())
            }),
        }
    }
}

/// Settings page template.
#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub shell: ShellView,
    pub flash: Flash,
    pub profile: ProfileView,
    pub server: ServerStatusView,
}

// =============================================================================
// Forms
// =============================================================================

/// New admin form input. Name and email are optional.
#[derive(Debug, Default, Deserialize)]
pub struct CreateAdminForm {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub pin: String,
}

impl CreateAdminForm {
    /// Validate the form into a [`NewAdmin`], returning the first problem as
    /// a display message.
    fn validate(&self) -> Result<NewAdmin, String> {
        let phone_number =
            PhoneNumber::parse(&self.phone_number).map_err(|e| capitalize(&e.to_string()))?;
        let pin = SecurityPin::parse(&self.pin).map_err(|e| capitalize(&e.to_string()))?;
        let email = Email::parse_optional(&self.email).map_err(|e| capitalize(&e.to_string()))?;
        Ok(NewAdmin {
            phone_number,
            name: self.name.trim().to_string(),
            email,
            pin,
        })
    }
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(settings_page))
        .route("/settings/admins", post(create_admin))
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the settings page.
///
/// GET /settings
#[instrument(skip(admin, state))]
pub async fn settings_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> Html<String> {
    let server = match state.backend().health().await {
        Ok(health) => ServerStatusView::from(&health),
        Err(e) => {
            tracing::warn!(error = %e, "Backend health check failed");
            ServerStatusView::offline()
        }
    };

    render(&SettingsTemplate {
        shell: ShellView::new(&admin, BASE),
        flash,
        profile: ProfileView::from(&admin),
        server,
    })
}

/// Create another admin account.
///
/// POST /settings/admins
#[instrument(skip(admin, state, form))]
pub async fn create_admin(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<CreateAdminForm>,
) -> Redirect {
    let new_admin = match form.validate() {
        Ok(a) => a,
        Err(message) => return redirect_error(BASE, &message),
    };

    match state.backend().create_admin(&admin.id, &new_admin).await {
        Ok(created) => {
            tracing::info!(
                created_by = %admin.id,
                admin_id = %created.id,
                "Admin account created"
            );
            let name = created.name.unwrap_or_default();
            redirect_success(BASE, &format!("Admin {name} created successfully!"))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create admin");
            redirect_error(BASE, &e.user_message_or("Failed to create admin"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(phone: &str, email: &str, pin: &str) -> CreateAdminForm {
        CreateAdminForm {
            phone_number: phone.to_string(),
            name: " Meera ".to_string(),
            email: email.to_string(),
            pin: pin.to_string(),
        }
    }

    #[test]
    fn test_create_admin_form_validates() {
        let admin = form("+91 98765 43210", "", "1234").validate().unwrap();
        assert_eq!(admin.name, "Meera");
        assert!(admin.email.is_none());
    }

    #[test]
    fn test_create_admin_form_reports_first_problem() {
        assert_eq!(
            form("", "", "1234").validate().unwrap_err(),
            "Phone number is required"
        );
        assert_eq!(
            form("9876543210", "", "12").validate().unwrap_err(),
            "PIN must be exactly 4 digits"
        );
        assert!(form("9876543210", "meera", "1234").validate().is_err());
    }

    #[test]
    fn test_server_status_from_health() {
        let health = HealthStatus {
            status: "ok".to_string(),
            timestamp: Some("2026-10-19T08:30:15.000Z".to_string()),
        };
        let view = ServerStatusView::from(&health);
        assert!(view.online);
        assert_eq!(view.checked_at.as_deref(), Some("08:30:15"));

        let down = HealthStatus {
            status: "error".to_string(),
            timestamp: None,
        };
        assert!(!ServerStatusView::from(&down).online);
    }
}
