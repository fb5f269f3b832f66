//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! GET  /auth/login                   - Login page
//! POST /auth/login                   - Phone + PIN sign-in
//! POST /auth/logout                  - Logout
//!
//! # Dashboard
//! GET  /                             - Overview
//!
//! # Users
//! GET  /users                        - Search / role filter / pages
//! GET  /users/{id}                   - Detail with booking stats
//! POST /users/{id}                   - Update name and email
//! POST /users/{id}/toggle-status     - Activate / deactivate
//! POST /users/{id}/delete            - Delete
//!
//! # Approvals
//! GET  /approvals                    - Nanny, daycare and elder-care queues
//! POST /approvals/nannies/{id}       - Approve / reject a nanny
//! POST /approvals/{kind}/{id}        - Approve / reject a provider
//!
//! # Providers, bookings, reviews
//! GET  /providers                    - Merged provider lists
//! GET  /bookings                     - Search / status filter / pages
//! GET  /bookings/{id}                - Detail with actions
//! POST /bookings/{id}/status         - Confirm / cancel
//! GET  /reviews                      - Reviews
//!
//! # Notifications, analytics, settings
//! GET  /notifications                - Composer
//! POST /notifications                - Send
//! GET  /analytics                    - Rates and trends
//! GET  /settings                     - Profile, backend health
//! POST /settings/admins              - Create another admin
//! ```

use askama::Template;
use axum::{
    Router,
    response::{Html, Redirect},
};
use serde::Deserialize;

use wecare_core::{ListFilter, ListQuery, Pagination};

use crate::state::AppState;

pub mod analytics;
pub mod approvals;
pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod format;
pub mod notifications;
pub mod providers;
pub mod reviews;
pub mod settings;
pub mod shell;
pub mod users;

/// Build the router for every page of the panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(users::router())
        .merge(approvals::router())
        .merge(providers::router())
        .merge(bookings::router())
        .merge(reviews::router())
        .merge(notifications::router())
        .merge(analytics::router())
        .merge(settings::router())
}

/// Render a page, logging instead of failing when the template errors.
pub(crate) fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Redirect back to `path` with a success message for the next page load.
pub(crate) fn redirect_success(path: &str, message: &str) -> Redirect {
    Redirect::to(&flash_url(path, "success", message))
}

/// Redirect back to `path` with an error message for the next page load.
pub(crate) fn redirect_error(path: &str, message: &str) -> Redirect {
    Redirect::to(&flash_url(path, "error", message))
}

/// Upper-case the first letter of a validation message.
pub(crate) fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Raw list parameters from the query string. Values are parsed leniently:
/// a bad page number or unknown filter falls back to the default view.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub search: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

impl ListParams {
    /// Build the typed query; `filter` is whichever raw value the view
    /// filters on.
    pub(crate) fn to_query<F: ListFilter>(&self, limit: u32, filter: Option<&str>) -> ListQuery<F> {
        let page = self.page.as_deref().and_then(|p| p.trim().parse().ok());
        ListQuery::from_raw(limit, page, self.search.as_deref(), filter)
    }
}

/// Previous/next links and the "page x of y" caption.
#[derive(Debug, Clone)]
pub struct PagerView {
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl PagerView {
    pub(crate) fn new<F: ListFilter>(
        query: &ListQuery<F>,
        pagination: &Pagination,
        base: &str,
    ) -> Self {
        Self {
            page: query.page(),
            pages: pagination.pages.max(1),
            total: pagination.total,
            previous: query.previous(pagination).map(|q| q.href(base)),
            next: query.next(pagination).map(|q| q.href(base)),
        }
    }
}

/// A filter choice rendered as a tab; following it resets to page 1.
#[derive(Debug, Clone)]
pub struct FilterTab {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

impl FilterTab {
    pub(crate) fn all<F: ListFilter + PartialEq>(
        query: &ListQuery<F>,
        base: &str,
        choices: &[(F, &'static str)],
    ) -> Vec<Self> {
        let mut tabs = vec![Self {
            label: "All",
            href: query.clone().with_filter(None).href(base),
            active: query.filter().is_none(),
        }];
        tabs.extend(choices.iter().map(|&(choice, label)| Self {
            label,
            href: query.clone().with_filter(Some(choice)).href(base),
            active: query.filter() == Some(choice),
        }));
        tabs
    }
}

fn flash_url(path: &str, key: &str, message: &str) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{path}{sep}{key}={}", urlencoding::encode(message))
}
