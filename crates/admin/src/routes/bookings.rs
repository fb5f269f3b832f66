//! Booking oversight routes.

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
    BookingAction, BookingId, BookingStatus, BookingTransition, ListQuery, PAGE_SIZE,
};

use crate::{
    api::{Booking, person_name, person_phone},
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

const BASE: &str = "/bookings";

/// An action button on the booking detail page.
#[derive(Debug, Clone)]
pub struct ActionView {
    pub action: &'static str,
    pub label: &'static str,
    pub requires_reason: bool,
}

impl From<BookingAction> for ActionView {
    fn from(action: BookingAction) -> Self {
        Self {
            action: action.as_str(),
            label: action.label(),
            requires_reason: action.requires_reason(),
        }
    }
}

/// Full booking for the detail page.
#[derive(Debug, Clone)]
pub struct BookingDetailView {
    pub id: String,
    pub code: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub parent_name: String,
    pub parent_phone: String,
    pub nanny_name: String,
    pub nanny_phone: String,
    pub date: String,
    pub time: String,
    pub hours: String,
    pub hourly_rate: String,
    pub total_amount: String,
    pub address: String,
    pub payment_method: String,
    pub payment_status: String,
    pub created: String,
    pub actions: Vec<ActionView>,
    /// Set once the booking can no longer change.
    pub terminal: bool,
    /// `rate × hours` when it disagrees with the stored total.
    pub expected_total: Option<String>,
}

impl From<&Booking> for BookingDetailView {
    fn from(booking: &Booking) -> Self {
        let payment = booking.payment();
        Self {
            id: booking.id.to_string(),
            code: booking.booking_id.clone(),
            status: booking.status.as_str(),
            status_label: booking.status.label(),
            parent_name: person_name(booking.parent_id.as_ref(), "Unknown parent"),
            parent_phone: format::or_dash(person_phone(booking.parent_id.as_ref()).as_deref()),
            nanny_name: person_name(booking.nanny_id.as_ref(), "Unknown nanny"),
            nanny_phone: format::or_dash(person_phone(booking.nanny_id.as_ref()).as_deref()),
            date: format::date(booking.date),
            time: format!("{} - {}", booking.start_time, booking.end_time),
            hours: booking.total_hours.normalize().to_string(),
            hourly_rate: booking.hourly_rate.to_string(),
            total_amount: booking.total_amount.to_string(),
            address: booking
                .address
                .as_ref()
                .map_or_else(|| "-".to_string(), |a| format::or_dash(Some(&a.one_line()))),
            payment_method: payment.method,
            payment_status: payment.status,
            created: format::date_time(booking.created_at),
            actions: booking
                .status
                .admin_actions()
                .iter()
                .copied()
                .map(ActionView::from)
                .collect(),
            terminal: booking.status.is_terminal(),
            expected_total: Some(booking.expected_total())
                .filter(|expected| *expected != booking.total_amount)
                .map(|expected| expected.to_string()),
        }
    }
}

/// Bookings list template.
#[derive(Template)]
#[template(path = "bookings/index.html")]
pub struct BookingsIndexTemplate {
    pub shell: ShellView,
    pub flash: Flash,
    pub bookings: Vec<RecentBookingView>,
    pub tabs: Vec<FilterTab>,
    pub search: String,
    pub status: String,
    pub pager: Option<PagerView>,
    pub error: Option<String>,
}

/// Booking detail template.
#[derive(Template)]
#[template(path = "bookings/show.html")]
pub struct BookingShowTemplate {
    pub shell: ShellView,
    pub flash: Flash,
    pub booking: BookingDetailView,
}

/// Status change form. `status` is what the page showed when rendered.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub action: BookingAction,
    pub status: BookingStatus,
    #[serde(default)]
    pub reason: String,
}

/// Build the bookings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(index))
        .route("/bookings/{id}", get(show))
        .route("/bookings/{id}/status", post(update_status))
}

fn status_choices() -> Vec<(BookingStatus, &'static str)> {
    BookingStatus::ALL.iter().map(|s| (*s, s.label())).collect()
}

fn parse_booking_id(raw: &str) -> Result<BookingId, AppError> {
    BookingId::parse(raw).map_err(|_| AppError::NotFound(format!("booking {raw}")))
}

/// Bookings list page handler.
///
/// GET /bookings
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(flash): Query<Flash>,
) -> Html<String> {
    let query: ListQuery<BookingStatus> = params.to_query(PAGE_SIZE, params.status.as_deref());

    let (bookings, pager, error) = match state.backend().list_bookings(&query).await {
        Ok(page) => (
            page.bookings.iter().map(RecentBookingView::from).collect(),
            Some(PagerView::new(&query, &page.pagination, BASE)),
            None,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch bookings: {e}");
            (vec![], None, Some(e.user_message()))
        }
    };

    render(&BookingsIndexTemplate {
        shell: ShellView::new(&admin, BASE),
        flash,
        bookings,
        tabs: FilterTab::all(&query, BASE, &status_choices()),
        search: query.search().unwrap_or_default().to_string(),
        status: query.filter().map(|s| s.as_str().to_string()).unwrap_or_default(),
        pager,
        error,
    })
}

/// Booking detail page handler.
///
/// GET /bookings/{id}
#[instrument(skip(admin, state))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(flash): Query<Flash>,
) -> Result<Html<String>, AppError> {
    let id = parse_booking_id(&id)?;
    let shell = ShellView::new(&admin, &format!("{BASE}/{id}"));

    let booking = match state.backend().booking(&id).await {
        Ok(booking) => booking,
        Err(e) => {
            tracing::error!(booking_id = %id, "Failed to fetch booking: {e}");
            return Ok(render(&UnavailableTemplate {
                shell,
                heading: "Booking Details",
                back_href: BASE,
                back_label: "Bookings",
                message: e.user_message(),
            }));
        }
    };

    Ok(render(&BookingShowTemplate {
        shell,
        flash,
        booking: BookingDetailView::from(&booking),
    }))
}

/// Confirm or cancel a booking.
///
/// POST /bookings/{id}/status
#[instrument(skip(_admin, state, form))]
pub async fn update_status(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let id = parse_booking_id(&id)?;
    let back = format!("{BASE}/{id}");

    let transition = match BookingTransition::new(form.status, form.action, Some(&form.reason)) {
        Ok(t) => t,
        Err(e) => return Ok(redirect_error(&back, &capitalize(&e.to_string()))),
    };

    Ok(
        match state.backend().update_booking_status(&id, &transition).await {
            Ok(ack) => {
                tracing::info!(
                    booking_id = %id,
                    status = %transition.target(),
                    "Booking status updated"
                );
                let fallback = format!("Booking {}", transition.target().label().to_lowercase());
                redirect_success(&back, ack.message.as_deref().unwrap_or(&fallback))
            }
            Err(e) => {
                tracing::warn!(booking_id = %id, error = %e, "Failed to update booking status");
                redirect_error(&back, &e.user_message_or("Failed to update booking"))
            }
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn booking(status: &str, total: u32) -> Booking {
        serde_json::from_value(json!({
            "_id": "b1",
            "bookingId": "WC00000001",
            "totalHours": 4,
            "hourlyRate": 250,
            "totalAmount": total,
            "status": status
        }))
        .unwrap()
    }

    #[test]
    fn test_pending_booking_offers_confirm_and_cancel() {
        let view = BookingDetailView::from(&booking("pending", 1000));
        let actions: Vec<_> = view.actions.iter().map(|a| a.action).collect();
        assert_eq!(actions, ["confirm", "cancel"]);
        assert!(!view.terminal);
        assert!(view.expected_total.is_none());
    }

    #[test]
    fn test_terminal_booking_offers_nothing() {
        let view = BookingDetailView::from(&booking("completed", 1000));
        assert!(view.actions.is_empty());
        assert!(view.terminal);
    }

    #[test]
    fn test_mismatched_total_is_flagged() {
        let view = BookingDetailView::from(&booking("confirmed", 900));
        assert_eq!(
            view.expected_total,
            Some(booking("confirmed", 1000).total_amount.to_string())
        );
    }
}
