//! Provider directory: daycare centers and elder-care caregivers.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use wecare_core::ProviderKind;

use crate::{
    api::{ApiError, Provider, ProviderQueue},
    filters,
    middleware::RequireAdminAuth,
    services::providers,
    state::AppState,
};

use super::{format, render, shell::ShellView};

/// Provider card shared by the directory and the approval queues.
#[derive(Debug, Clone)]
pub struct ProviderView {
    pub id: String,
    pub kind: &'static str,
    pub name: String,
    pub subtitle: String,
    pub meta: String,
    pub status: &'static str,
    pub price: String,
    pub rejection_reason: Option<String>,
    pub submitted: String,
}

impl From<&Provider> for ProviderView {
    fn from(provider: &Provider) -> Self {
        let city = format::or_dash(provider.city());
        let phone = format::or_dash(provider.phone_number());
        let (name, subtitle, meta) = match provider {
            Provider::Daycare(d) => (
                d.center_name.clone().unwrap_or_else(|| "Unnamed Daycare".to_string()),
                format!("{} • {phone}", d.owner_name.as_deref().unwrap_or("Owner")),
                format!(
                    "City: {city} • Capacity: {}",
                    d.total_capacity.map_or_else(|| "-".to_string(), |c| c.to_string())
                ),
            ),
            Provider::ElderCare(e) => (
                e.name.clone().unwrap_or_else(|| "Unnamed Caregiver".to_string()),
                format!("{phone} • {}", e.email.as_deref().unwrap_or("No email")),
                format!(
                    "Experience: {} yrs • City: {city}",
                    e.experience.unwrap_or_default().normalize()
                ),
            ),
        };
        let kind = provider.kind();
        Self {
            id: provider.id().to_string(),
            kind: kind.as_str(),
            name,
            subtitle,
            meta,
            status: provider.verification_status().as_str(),
            price: provider.estimated_price().map_or_else(
                || "Price on request".to_string(),
                |p| format!("{p}/{}", kind.price_unit()),
            ),
            rejection_reason: provider.rejection_reason().map(ToOwned::to_owned),
            submitted: format::date(provider.created_at()),
        }
    }
}

/// One provider tab with its merged and filtered list.
#[derive(Debug, Clone)]
pub struct ProviderTab {
    pub kind: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub active: bool,
    pub providers: Vec<ProviderView>,
    pub error: Option<String>,
}

/// Providers template.
#[derive(Template)]
#[template(path = "providers.html")]
pub struct ProvidersTemplate {
    pub shell: ShellView,
    pub tabs: Vec<ProviderTab>,
    pub search: String,
}

impl ProvidersTemplate {
    /// Query string that keeps the current search when switching tabs.
    #[must_use]
    pub fn search_suffix(&self) -> String {
        if self.search.is_empty() {
            String::new()
        } else {
            format!("&search={}", urlencoding::encode(&self.search))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProvidersQuery {
    pub tab: Option<String>,
    pub search: Option<String>,
}

/// Build the providers router.
pub fn router() -> Router<AppState> {
    Router::new().route("/providers", get(index))
}

/// Fetch pending and listed providers of one kind and merge them.
async fn merged(state: &AppState, kind: ProviderKind) -> Result<Vec<Provider>, ApiError> {
    let backend = state.backend();
    let (pending, listed) = tokio::join!(
        backend.list_providers(kind, ProviderQueue::Pending),
        backend.list_providers(kind, ProviderQueue::Listed),
    );
    Ok(providers::merge(pending?, listed?))
}

/// Providers page handler.
///
/// GET /providers
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<ProvidersQuery>,
) -> Html<String> {
    let active = query
        .tab
        .as_deref()
        .and_then(|t| t.parse::<ProviderKind>().ok())
        .unwrap_or(ProviderKind::Daycare);
    let search = query.search.as_deref().map(str::trim).unwrap_or_default();

    let (daycare, eldercare) = tokio::join!(
        merged(&state, ProviderKind::Daycare),
        merged(&state, ProviderKind::Eldercare),
    );

    let tabs = [(ProviderKind::Daycare, daycare), (ProviderKind::Eldercare, eldercare)]
        .into_iter()
        .map(|(kind, result)| {
            let (list, error) = match result {
                Ok(list) => (providers::filter(list, Some(search)), None),
                Err(e) => {
                    tracing::error!("Failed to fetch {kind} providers: {e}");
                    (vec![], Some(e.user_message()))
                }
            };
            ProviderTab {
                kind: kind.as_str(),
                label: kind.label(),
                count: list.len(),
                active: kind == active,
                providers: list.iter().map(ProviderView::from).collect(),
                error,
            }
        })
        .collect();

    render(&ProvidersTemplate {
        shell: ShellView::new(&admin, "/providers"),
        tabs,
        search: search.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use wecare_core::{ProviderId, Rupees, VerificationStatus};

    use super::*;
    use crate::api::{Address, ElderCare};

    #[test]
    fn test_elder_care_view() {
        let provider = Provider::ElderCare(ElderCare {
            id: ProviderId::parse("e1").unwrap(),
            name: Some("Asha Nair".to_string()),
            email: None,
            experience: Some(Decimal::from(7)),
            phone_number: Some("9876500000".to_string()),
            address: Some(Address {
                city: Some("Kochi".to_string()),
                ..Address::default()
            }),
            verification_status: VerificationStatus::Approved,
            admin_estimated_price: Some(Rupees::new(Decimal::from(350))),
            rejection_reason: None,
            created_at: None,
        });
        let view = ProviderView::from(&provider);
        assert_eq!(view.subtitle, "9876500000 • No email");
        assert_eq!(view.meta, "Experience: 7 yrs • City: Kochi");
        assert_eq!(view.price, "₹350/hour");
        assert_eq!(view.status, "approved");
    }
}
