//! Push notification composer.
//!
//! The composer has three modes (one user, one role, everyone). A draft is
//! validated before anything is sent; an invalid draft is shown again with
//! the problem and never reaches the backend.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use wecare_core::{ComposerMode, NotificationDraft, QUICK_TEMPLATES, UserRole};

use crate::{filters, middleware::RequireAdminAuth, state::AppState};

use super::{
    capitalize, redirect_success, render,
    shell::{Flash, ShellView},
};

const BASE: &str = "/notifications";

/// Roles a notification can be addressed to.
const ROLE_CHOICES: [UserRole; 2] = [UserRole::Parent, UserRole::Nanny];

/// A mode button above the composer.
#[derive(Debug, Clone)]
pub struct ModeTab {
    pub mode: &'static str,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// An option in the role picker.
#[derive(Debug, Clone)]
pub struct RoleOption {
    pub value: &'static str,
    pub label: String,
    pub selected: bool,
}

/// A canned message; following its link fills the composer.
#[derive(Debug, Clone)]
pub struct TemplateLink {
    pub title: &'static str,
    pub body: &'static str,
    pub href: String,
}

/// Composer page template.
#[derive(Template)]
#[template(path = "notifications.html")]
pub struct NotificationsTemplate {
    pub shell: ShellView,
    pub flash: Flash,
    pub mode: &'static str,
    pub modes: Vec<ModeTab>,
    pub roles: Vec<RoleOption>,
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub templates: Vec<TemplateLink>,
}

/// Composer query: the active mode and an optional quick template index.
#[derive(Debug, Default, Deserialize)]
pub struct ComposerQuery {
    pub mode: Option<String>,
    pub template: Option<String>,
}

impl ComposerQuery {
    fn mode(&self) -> ComposerMode {
        self.mode
            .as_deref()
            .and_then(|m| ComposerMode::ALL.into_iter().find(|c| c.as_str() == m))
            .unwrap_or_default()
    }

    fn draft(&self) -> NotificationDraft {
        let template = self
            .template
            .as_deref()
            .and_then(|t| t.trim().parse::<usize>().ok())
            .and_then(|i| QUICK_TEMPLATES.get(i));
        NotificationDraft {
            mode: self.mode(),
            title: template.map(|t| t.title.to_string()).unwrap_or_default(),
            body: template.map(|t| t.body.to_string()).unwrap_or_default(),
            ..NotificationDraft::default()
        }
    }
}

impl NotificationsTemplate {
    fn new(shell: ShellView, flash: Flash, draft: &NotificationDraft) -> Self {
        let mode = draft.mode;
        let selected_role = draft.role.unwrap_or(UserRole::Parent);
        Self {
            shell,
            flash,
            mode: mode.as_str(),
            modes: ComposerMode::ALL
                .into_iter()
                .map(|m| ModeTab {
                    mode: m.as_str(),
                    label: m.label(),
                    href: format!("{BASE}?mode={}", m.as_str()),
                    active: m == mode,
                })
                .collect(),
            roles: ROLE_CHOICES
                .into_iter()
                .map(|r| RoleOption {
                    value: r.as_str(),
                    label: format!("All {}", r.plural_label()),
                    selected: r == selected_role,
                })
                .collect(),
            user_id: draft.user_id.clone(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            templates: QUICK_TEMPLATES
                .iter()
                .enumerate()
                .map(|(i, t)| TemplateLink {
                    title: t.title,
                    body: t.body,
                    href: format!("{BASE}?mode={}&template={i}", mode.as_str()),
                })
                .collect(),
        }
    }
}

/// Build the notifications router.
pub fn router() -> Router<AppState> {
    Router::new().route("/notifications", get(compose).post(send))
}

/// Composer page handler.
///
/// GET /notifications
#[instrument(skip(admin))]
pub async fn compose(
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(query): Query<ComposerQuery>,
    Query(flash): Query<Flash>,
) -> Html<String> {
    render(&NotificationsTemplate::new(
        ShellView::new(&admin, BASE),
        flash,
        &query.draft(),
    ))
}

/// Validate and send a notification.
///
/// POST /notifications
#[instrument(skip(admin, state, draft), fields(mode = draft.mode.as_str()))]
pub async fn send(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Form(draft): Form<NotificationDraft>,
) -> Response {
    let shell = ShellView::new(&admin, BASE);
    let retry = |message: String| {
        let flash = Flash {
            success: None,
            error: Some(message),
        };
        render(&NotificationsTemplate::new(shell, flash, &draft)).into_response()
    };

    let notification = match draft.validate() {
        Ok(n) => n,
        Err(e) => return retry(capitalize(&e.to_string())),
    };

    match state.backend().send_notification(&notification).await {
        Ok(ack) => {
            tracing::info!(recipient = ?notification.target(), "Notification sent");
            let back = format!("{BASE}?mode={}", draft.mode.as_str());
            redirect_success(
                &back,
                ack.message
                    .as_deref()
                    .unwrap_or("Notification sent successfully!"),
            )
            .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to send notification");
            retry(e.user_message_or("Failed to send"))
        }
    }
}
