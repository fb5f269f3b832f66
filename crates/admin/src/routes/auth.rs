//! Authentication route handlers.
//!
//! Admins sign in with their phone number and 4-digit security PIN; the
//! backend checks the credentials and returns the admin profile, which is
//! kept in the session until logout.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use wecare_core::{PhoneNumber, SecurityPin};

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

use super::{capitalize, render};

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    phone_number: String,
    error: Option<String>,
}

/// Login form input. The PIN is never echoed back.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub pin: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", axum::routing::post(logout))
}

/// Render the login page, or go straight to the dashboard when signed in.
///
/// GET /auth/login
async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> Response {
    if admin.is_some() {
        return Redirect::to("/").into_response();
    }
    render(&LoginPageTemplate {
        phone_number: String::new(),
        error: None,
    })
    .into_response()
}

/// Check the credentials with the backend and start a session.
///
/// POST /auth/login
#[instrument(skip(state, session, form))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let failed = |message: String| {
        render(&LoginPageTemplate {
            phone_number: form.phone_number.clone(),
            error: Some(message),
        })
        .into_response()
    };

    let phone = match PhoneNumber::parse(&form.phone_number) {
        Ok(phone) => phone,
        Err(e) => return failed(capitalize(&e.to_string())),
    };
    let pin = match SecurityPin::parse(&form.pin) {
        Ok(pin) => pin,
        Err(e) => return failed(capitalize(&e.to_string())),
    };

    let profile = match state.backend().login(&phone, &pin).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(error = %e, "Admin login failed");
            return failed(e.user_message_or("Login failed"));
        }
    };

    let admin = CurrentAdmin::from(profile);
    if let Err(e) = set_current_admin(&session, &admin).await {
        tracing::error!("Failed to store admin session: {e}");
        return failed("Could not start a session, please try again".to_string());
    }

    set_sentry_user(admin.id.as_str(), &admin.phone_number);
    tracing::info!(admin_id = %admin.id, "Admin signed in");
    Redirect::to("/").into_response()
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!("Failed to clear admin session: {e}");
    }
    clear_sentry_user();

    Redirect::to("/auth/login")
}
