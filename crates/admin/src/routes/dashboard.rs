//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tracing::instrument;

use crate::{
    api::{Booking, DashboardStats, User, person_name},
    filters,
    middleware::RequireAdminAuth,
    services::metrics::{self, StatusShare},
    state::AppState,
};

use super::{format, render, shell::ShellView};

/// Headline figure with a short caption underneath.
#[derive(Debug, Clone)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub caption: String,
}

/// Bookings and revenue for one day of the trend table.
#[derive(Debug, Clone)]
pub struct TrendRow {
    pub date: String,
    pub bookings: u64,
    pub revenue: String,
}

#[derive(Debug, Clone)]
pub struct TopNannyView {
    pub name: String,
    pub phone_number: String,
    pub jobs: u64,
    pub rating: String,
}

impl From<&User> for TopNannyView {
    fn from(user: &User) -> Self {
        let (jobs, rating) = user.nanny_profile.as_ref().map_or((0, "0.0".to_string()), |p| {
            (p.total_jobs_completed, format!("{:.1}", p.rating))
        });
        Self {
            name: user.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            phone_number: user.phone_number.clone(),
            jobs,
            rating,
        }
    }
}

/// Compact booking line for activity lists.
#[derive(Debug, Clone)]
pub struct RecentBookingView {
    pub id: String,
    pub code: String,
    pub parties: String,
    pub amount: String,
    pub status: String,
    pub status_label: &'static str,
    pub created: String,
}

impl From<&Booking> for RecentBookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            code: booking.booking_id.clone(),
            parties: format!(
                "{} → {}",
                person_name(booking.parent_id.as_ref(), "Parent"),
                person_name(booking.nanny_id.as_ref(), "Nanny")
            ),
            amount: booking.total_amount.to_string(),
            status: booking.status.as_str().to_string(),
            status_label: booking.status.label(),
            created: format::day_month(booking.created_at),
        }
    }
}

/// Everything the dashboard shows once stats have loaded.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub cards: Vec<StatCard>,
    pub parents: u64,
    pub nannies: u64,
    pub new_this_week: u64,
    pub trend: Vec<TrendRow>,
    pub distribution: Vec<StatusShare>,
    pub top_nannies: Vec<TopNannyView>,
    pub recent_bookings: Vec<RecentBookingView>,
}

/// Number of bookings listed under "Recent Bookings".
const RECENT_BOOKINGS: usize = 6;

impl From<&DashboardStats> for DashboardView {
    fn from(stats: &DashboardStats) -> Self {
        let cards = vec![
            StatCard {
                label: "Total Users",
                value: stats.users.total.to_string(),
                caption: format!("+{} today", stats.users.new_users_today),
            },
            StatCard {
                label: "Total Bookings",
                value: stats.bookings.total.to_string(),
                caption: format!("{} today", stats.bookings.today),
            },
            StatCard {
                label: "Total Revenue",
                value: stats.revenue.total.to_string(),
                caption: format!("{} this month", stats.revenue.month),
            },
            StatCard {
                label: "Pending Approvals",
                value: stats.users.pending_nannies.to_string(),
                caption: "Nanny verifications".to_string(),
            },
        ];

        Self {
            cards,
            parents: stats.users.total_parents,
            nannies: stats.users.total_nannies,
            new_this_week: stats.users.new_users_week,
            trend: stats
                .booking_trend
                .iter()
                .map(|p| TrendRow {
                    date: format::trend_day(&p.date),
                    bookings: p.count,
                    revenue: p.revenue.to_string(),
                })
                .collect(),
            distribution: metrics::status_distribution(&stats.bookings),
            top_nannies: stats.top_nannies.iter().map(TopNannyView::from).collect(),
            recent_bookings: stats
                .recent_bookings
                .iter()
                .take(RECENT_BOOKINGS)
                .map(RecentBookingView::from)
                .collect(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub shell: ShellView,
    pub dashboard: Option<DashboardView>,
    pub error: Option<String>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Dashboard page handler.
///
/// GET /
#[instrument(skip(admin, state))]
pub async fn dashboard(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    let (dashboard, error) = match state.backend().stats().await {
        Ok(stats) => (Some(DashboardView::from(&stats)), None),
        Err(e) => {
            tracing::error!("Failed to fetch dashboard stats: {e}");
            (None, Some(e.user_message()))
        }
    };

    render(&DashboardTemplate {
        shell: ShellView::new(&admin, "/"),
        dashboard,
        error,
    })
}
