//! User management routes.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use wecare_core::{Email, ListQuery, PAGE_SIZE, UserId, UserRole};

use crate::{
    api::{Address, NannyProfile, User, UserBookingStats, UserDetail, UserUpdate},
    error::AppError,
    filters,
    middleware::RequireAdminAuth,
    state::AppState,
};

use super::{
    FilterTab, ListParams, PagerView, capitalize, dashboard::RecentBookingView, format,
    redirect_error, redirect_success, render,
    shell::{Flash, ShellView, UnavailableTemplate},
};

const BASE: &str = "/users";

/// User row for the list and the detail header.
#[derive(Debug, Clone)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub role: &'static str,
    pub is_admin: bool,
    pub is_verified: bool,
    pub is_deactivated: bool,
    pub joined: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unnamed".to_string()),
            phone_number: user.phone_number.clone(),
            email: format::or_dash(user.email.as_deref()),
            role: user.role.as_str(),
            is_admin: user.role == UserRole::Admin,
            is_verified: user.is_verified,
            is_deactivated: user.is_deactivated,
            joined: format::date(user.created_at),
        }
    }
}

/// Nanny profile section of the detail page.
#[derive(Debug, Clone)]
pub struct NannyProfileView {
    pub experience: String,
    pub hourly_rate: String,
    pub rating: String,
    pub jobs: u64,
    pub earnings: String,
    pub verified: bool,
    pub skills: Vec<String>,
    pub bio: String,
}

impl From<&NannyProfile> for NannyProfileView {
    fn from(profile: &NannyProfile) -> Self {
        Self {
            experience: format!("{} yrs", profile.experience.normalize()),
            hourly_rate: profile
                .hourly_rate
                .map_or_else(|| "-".to_string(), |r| format!("{r}/hr")),
            rating: format!("{:.1}", profile.rating),
            jobs: profile.total_jobs_completed,
            earnings: profile.total_earnings.to_string(),
            verified: profile.is_verified_nanny,
            skills: profile.skills.clone(),
            bio: format::or_dash(profile.bio.as_deref()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddressView {
    pub tag: String,
    pub line: String,
}

impl From<&Address> for AddressView {
    fn from(address: &Address) -> Self {
        Self {
            tag: address.tag.clone().unwrap_or_else(|| "Address".to_string()),
            line: address.one_line(),
        }
    }
}

/// Users list template.
#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UsersIndexTemplate {
    pub shell: ShellView,
    pub flash: Flash,
    pub users: Vec<UserView>,
    pub tabs: Vec<FilterTab>,
    pub search: String,
    pub role: String,
    pub pager: Option<PagerView>,
    pub error: Option<String>,
    pub return_to: String,
}

/// User detail template.
#[derive(Template)]
#[template(path = "users/show.html")]
pub struct UserShowTemplate {
    pub shell: ShellView,
    pub flash: Flash,
    pub user: UserView,
    pub edit_name: String,
    pub edit_email: String,
    pub stats: UserBookingStats,
    pub nanny: Option<NannyProfileView>,
    pub addresses: Vec<AddressView>,
    pub recent_bookings: Vec<RecentBookingView>,
}

/// Edit form input.
#[derive(Debug, Deserialize)]
pub struct UserEditForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Toggle/delete form input: where to go back to afterwards.
#[derive(Debug, Deserialize)]
pub struct ReturnForm {
    pub return_to: Option<String>,
}

impl ReturnForm {
    /// Only panel-internal user pages are accepted.
    fn target(&self) -> &str {
        self.return_to
            .as_deref()
            .filter(|p| p.starts_with(BASE))
            .unwrap_or(BASE)
    }
}

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(index))
        .route("/users/{id}", get(show).post(update))
        .route("/users/{id}/toggle-status", post(toggle_status))
        .route("/users/{id}/delete", post(delete))
}

fn role_choices() -> Vec<(UserRole, &'static str)> {
    UserRole::ALL.iter().map(|r| (*r, r.plural_label())).collect()
}

fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
    UserId::parse(raw).map_err(|_| AppError::NotFound(format!("user {raw}")))
}

/// Users list page handler.
///
/// GET /users
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(flash): Query<Flash>,
) -> Html<String> {
    let query: ListQuery<UserRole> = params.to_query(PAGE_SIZE, params.role.as_deref());

    let (users, pager, error) = match state.backend().list_users(&query).await {
        Ok(page) => (
            page.users.iter().map(UserView::from).collect(),
            Some(PagerView::new(&query, &page.pagination, BASE)),
            None,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch users: {e}");
            (vec![], None, Some(e.user_message()))
        }
    };

    render(&UsersIndexTemplate {
        shell: ShellView::new(&admin, BASE),
        flash,
        users,
        tabs: FilterTab::all(&query, BASE, &role_choices()),
        search: query.search().unwrap_or_default().to_string(),
        role: query.filter().map(|r| r.as_str().to_string()).unwrap_or_default(),
        pager,
        error,
        return_to: query.href(BASE),
    })
}

/// User detail page handler.
///
/// GET /users/{id}
#[instrument(skip(admin, state))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(flash): Query<Flash>,
) -> Result<Html<String>, AppError> {
    let id = parse_user_id(&id)?;
    let shell = ShellView::new(&admin, &format!("{BASE}/{id}"));

    let UserDetail {
        user,
        booking_stats,
        recent_bookings,
    } = match state.backend().user(&id).await {
        Ok(detail) => detail,
        Err(e) => {
            tracing::error!(user_id = %id, "Failed to fetch user: {e}");
            return Ok(render(&UnavailableTemplate {
                shell,
                heading: "User Details",
                back_href: BASE,
                back_label: "Users",
                message: e.user_message(),
            }));
        }
    };

    Ok(render(&UserShowTemplate {
        shell,
        flash,
        edit_name: user.name.clone().unwrap_or_default(),
        edit_email: user.email.clone().unwrap_or_default(),
        nanny: user.nanny().map(NannyProfileView::from),
        addresses: user.addresses.iter().map(AddressView::from).collect(),
        user: UserView::from(&user),
        stats: booking_stats,
        recent_bookings: recent_bookings.iter().map(RecentBookingView::from).collect(),
    }))
}

/// Update name and email.
///
/// POST /users/{id}
#[instrument(skip(_admin, state, form))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UserEditForm>,
) -> Result<Redirect, AppError> {
    let id = parse_user_id(&id)?;
    let back = format!("{BASE}/{id}");

    let email = match Email::parse_optional(&form.email) {
        Ok(email) => email,
        Err(e) => return Ok(redirect_error(&back, &capitalize(&e.to_string()))),
    };
    let name = Some(form.name.trim().to_string()).filter(|n| !n.is_empty());
    let update = UserUpdate { name, email };

    Ok(match state.backend().update_user(&id, &update).await {
        Ok(ack) => {
            tracing::info!(user_id = %id, "User updated");
            redirect_success(&back, ack.message.as_deref().unwrap_or("User updated"))
        }
        Err(e) => {
            tracing::warn!(user_id = %id, error = %e, "Failed to update user");
            redirect_error(&back, &e.user_message_or("Failed to update user"))
        }
    })
}

/// Activate or deactivate a user.
///
/// POST /users/{id}/toggle-status
#[instrument(skip(_admin, state, form))]
pub async fn toggle_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ReturnForm>,
) -> Result<Redirect, AppError> {
    let id = parse_user_id(&id)?;
    let back = form.target();

    Ok(match state.backend().toggle_user_status(&id).await {
        Ok(ack) => {
            tracing::info!(user_id = %id, "User status toggled");
            redirect_success(back, ack.message.as_deref().unwrap_or("User status updated"))
        }
        Err(e) => {
            tracing::warn!(user_id = %id, error = %e, "Failed to toggle user status");
            redirect_error(back, &e.user_message_or("Failed to update user status"))
        }
    })
}

/// Delete a user. Admin accounts cannot be deleted from the panel.
///
/// POST /users/{id}/delete
#[instrument(skip(_admin, state, form))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ReturnForm>,
) -> Result<Response, AppError> {
    let id = parse_user_id(&id)?;
    let mut back = form.target().to_string();
    if back.starts_with(&format!("{BASE}/{id}")) {
        back = BASE.to_string();
    }

    let detail = match state.backend().user(&id).await {
        Ok(detail) => detail,
        Err(e) => {
            tracing::warn!(user_id = %id, error = %e, "Failed to look up user before delete");
            let message = e.user_message_or("Failed to delete user");
            return Ok(redirect_error(&back, &message).into_response());
        }
    };
    if detail.user.role == UserRole::Admin {
        return Ok(redirect_error(&back, "Admin accounts cannot be deleted").into_response());
    }

    Ok(match state.backend().delete_user(&id).await {
        Ok(ack) => {
            tracing::info!(user_id = %id, "User deleted");
            redirect_success(&back, ack.message.as_deref().unwrap_or("User deleted"))
        }
        Err(e) => {
            tracing::warn!(user_id = %id, error = %e, "Failed to delete user");
            redirect_error(&back, &e.user_message_or("Failed to delete user"))
        }
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_target_stays_on_user_pages() {
        let form = |p: &str| ReturnForm {
            return_to: Some(p.to_string()),
        };
        assert_eq!(form("/users?page=2&role=nanny").target(), "/users?page=2&role=nanny");
        assert_eq!(form("https://evil.example").target(), "/users");
        assert_eq!(ReturnForm { return_to: None }.target(), "/users");
    }
}
