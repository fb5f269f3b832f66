//! Approval queues: nannies, daycare centers and elder-care caregivers.
//!
//! Decisions are validated against the last-known state shown on the page
//! before anything is sent; a refused decision redirects back with the
//! reason and makes no backend call.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use wecare_core::{
    NannyDecision, NannyVerification, ProviderId, ProviderKind, ProviderVerification, UserId,
    VerificationStatus, parse_price,
};

use crate::{
    api::{ProviderQueue, User},
    error::AppError,
    filters,
    middleware::RequireAdminAuth,
    state::AppState,
};

use super::{
    capitalize, format,
    providers::ProviderView,
    redirect_error, redirect_success, render,
    shell::{Flash, ShellView},
};

const BASE: &str = "/approvals";

/// Pending nanny application.
#[derive(Debug, Clone)]
pub struct NannyApplicationView {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    pub applied: String,
    pub verified: bool,
}

impl From<&User> for NannyApplicationView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unnamed Nanny".to_string()),
            subtitle: format!(
                "{} • {}",
                user.phone_number,
                user.email.as_deref().unwrap_or("No email")
            ),
            applied: format!("Applied: {}", format::date(user.created_at)),
            verified: user.is_verified || user.nanny().is_some_and(|p| p.is_verified_nanny),
        }
    }
}

/// Queue of pending providers of one kind.
#[derive(Debug, Clone)]
pub struct ProviderQueueView {
    pub kind: &'static str,
    pub label: &'static str,
    pub price_prompt: &'static str,
    pub providers: Vec<ProviderView>,
    pub error: Option<String>,
}

/// Approvals template.
#[derive(Template)]
#[template(path = "approvals.html")]
pub struct ApprovalsTemplate {
    pub shell: ShellView,
    pub flash: Flash,
    /// `nannies`, `daycare` or `eldercare`.
    pub tab: &'static str,
    pub nannies: Vec<NannyApplicationView>,
    pub nannies_error: Option<String>,
    pub daycare: ProviderQueueView,
    pub eldercare: ProviderQueueView,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApprovalsQuery {
    pub tab: Option<String>,
}

/// Nanny decision form.
#[derive(Debug, Deserialize)]
pub struct NannyDecisionForm {
    pub decision: NannyDecision,
    /// Verified flag as it was when the page was rendered.
    #[serde(default)]
    pub verified: bool,
}

/// Approve or reject, as posted by a provider card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderAction {
    Approve,
    Reject,
}

/// Provider decision form.
#[derive(Debug, Deserialize)]
pub struct ProviderDecisionForm {
    pub decision: ProviderAction,
    /// Status as it was when the page was rendered.
    #[serde(default)]
    pub status: VerificationStatus,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub reason: String,
}

impl ProviderDecisionForm {
    fn verification(&self) -> Result<ProviderVerification, wecare_core::TransitionError> {
        match self.decision {
            ProviderAction::Approve => {
                ProviderVerification::approve(self.status, parse_price(&self.price)?)
            }
            ProviderAction::Reject => ProviderVerification::reject(self.status, Some(&self.reason)),
        }
    }
}

/// Build the approvals router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/approvals", get(index))
        .route("/approvals/nannies/{id}", post(decide_nanny))
        .route("/approvals/{kind}/{id}", post(decide_provider))
}

const fn price_prompt(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Daycare => "Estimated monthly price (₹)",
        ProviderKind::Eldercare => "Estimated hourly price (₹)",
    }
}

fn tab_href(tab: &str) -> String {
    format!("{BASE}?tab={tab}")
}

/// Approvals page handler.
///
/// GET /approvals
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ApprovalsQuery>,
    Query(flash): Query<Flash>,
) -> Html<String> {
    let tab = match query.tab.as_deref() {
        Some("daycare") => "daycare",
        Some("eldercare") => "eldercare",
        _ => "nannies",
    };

    let backend = state.backend();
    let (nannies, daycare, eldercare) = tokio::join!(
        backend.pending_nannies(),
        backend.list_providers(ProviderKind::Daycare, ProviderQueue::Pending),
        backend.list_providers(ProviderKind::Eldercare, ProviderQueue::Pending),
    );

    let (nannies, nannies_error) = match nannies {
        Ok(users) => (users.iter().map(NannyApplicationView::from).collect(), None),
        Err(e) => {
            tracing::error!("Failed to fetch pending nannies: {e}");
            (vec![], Some(e.user_message()))
        }
    };

    let queue = |kind: ProviderKind, result: Result<Vec<_>, crate::api::ApiError>| {
        let (providers, error) = match result {
            Ok(list) => (list.iter().map(ProviderView::from).collect(), None),
            Err(e) => {
                tracing::error!("Failed to fetch pending {kind} providers: {e}");
                (vec![], Some(e.user_message()))
            }
        };
        ProviderQueueView {
            kind: kind.as_str(),
            label: kind.label(),
            price_prompt: price_prompt(kind),
            providers,
            error,
        }
    };

    render(&ApprovalsTemplate {
        shell: ShellView::new(&admin, BASE),
        flash,
        tab,
        nannies,
        nannies_error,
        daycare: queue(ProviderKind::Daycare, daycare),
        eldercare: queue(ProviderKind::Eldercare, eldercare),
    })
}

/// Approve or reject a nanny.
///
/// POST /approvals/nannies/{id}
#[instrument(skip(_admin, state, form))]
pub async fn decide_nanny(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<NannyDecisionForm>,
) -> Result<Redirect, AppError> {
    let back = tab_href("nannies");
    let id = UserId::parse(&id).map_err(|_| AppError::NotFound(format!("nanny {id}")))?;

    let verification = match NannyVerification::new(form.verified, form.decision) {
        Ok(v) => v,
        Err(e) => return Ok(redirect_error(&back, &capitalize(&e.to_string()))),
    };

    Ok(match state.backend().verify_nanny(&id, verification).await {
        Ok(ack) => {
            tracing::info!(
                nanny_id = %id,
                approved = verification.approved(),
                "Nanny verification recorded"
            );
            let fallback = if verification.approved() {
                "Nanny approved"
            } else {
                "Nanny rejected"
            };
            redirect_success(&back, ack.message.as_deref().unwrap_or(fallback))
        }
        Err(e) => {
            tracing::warn!(nanny_id = %id, error = %e, "Failed to verify nanny");
            redirect_error(&back, &e.user_message_or("Failed to update nanny"))
        }
    })
}

/// Approve (with an estimated price) or reject a provider.
///
/// POST /approvals/{kind}/{id}
#[instrument(skip(_admin, state, form))]
pub async fn decide_provider(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Form(form): Form<ProviderDecisionForm>,
) -> Result<Redirect, AppError> {
    let kind: ProviderKind = kind
        .parse()
        .map_err(|_| AppError::NotFound(format!("provider kind {kind}")))?;
    let back = tab_href(kind.as_str());
    let id = ProviderId::parse(&id).map_err(|_| AppError::NotFound(format!("provider {id}")))?;

    let verification = match form.verification() {
        Ok(v) => v,
        Err(e) => return Ok(redirect_error(&back, &capitalize(&e.to_string()))),
    };

    Ok(
        match state.backend().verify_provider(kind, &id, &verification).await {
            Ok(ack) => {
                tracing::info!(
                    provider_id = %id,
                    %kind,
                    status = %verification.status(),
                    "Provider verification recorded"
                );
                let fallback = format!("{} {}", kind.label(), verification.status());
                redirect_success(&back, ack.message.as_deref().unwrap_or(&fallback))
            }
            Err(e) => {
                tracing::warn!(provider_id = %id, %kind, error = %e, "Failed to verify provider");
                redirect_error(&back, &e.user_message_or("Failed to update provider"))
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use wecare_core::TransitionError;

    use super::*;

    fn form(decision: ProviderAction, price: &str, reason: &str) -> ProviderDecisionForm {
        ProviderDecisionForm {
            decision,
            status: VerificationStatus::Pending,
            price: price.to_string(),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_approve_without_price_is_refused() {
        assert_eq!(
            form(ProviderAction::Approve, "  ", "").verification(),
            Err(TransitionError::PriceRequired)
        );
        assert!(matches!(
            form(ProviderAction::Approve, "lots", "").verification(),
            Err(TransitionError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_reject_blank_reason() {
        let v = form(ProviderAction::Reject, "", "   ").verification();
        assert_eq!(v.map(|v| v.rejection_reason().map(ToOwned::to_owned)), Ok(None));
    }

    #[test]
    fn test_price_prompt_per_kind() {
        assert_eq!(price_prompt(ProviderKind::Daycare), "Estimated monthly price (₹)");
        assert_eq!(price_prompt(ProviderKind::Eldercare), "Estimated hourly price (₹)");
    }
}
