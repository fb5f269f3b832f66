//! Analytics page: rates, trends and summaries derived from the stats
//! endpoint.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tracing::instrument;

use crate::{
    api::DashboardStats,
    filters,
    middleware::RequireAdminAuth,
    services::metrics::{self, RegistrationDay},
    state::AppState,
};

use super::{
    dashboard::{StatCard, TrendRow},
    format, render,
    shell::ShellView,
};

/// A titled block of label/value rows.
#[derive(Debug, Clone)]
pub struct SummaryBlock {
    pub title: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

/// Everything the analytics page shows once stats have loaded.
#[derive(Debug, Clone)]
pub struct AnalyticsView {
    pub metrics: Vec<StatCard>,
    pub revenue_trend: Vec<TrendRow>,
    pub registrations: Vec<RegistrationDay>,
    pub summaries: Vec<SummaryBlock>,
}

impl From<&DashboardStats> for AnalyticsView {
    fn from(stats: &DashboardStats) -> Self {
        let metrics = vec![
            StatCard {
                label: "Completion Rate",
                value: format!("{}%", metrics::completion_rate(&stats.bookings)),
                caption: "Bookings completed".to_string(),
            },
            StatCard {
                label: "Cancellation Rate",
                value: format!("{}%", metrics::cancellation_rate(&stats.bookings)),
                caption: "Bookings cancelled".to_string(),
            },
            StatCard {
                label: "Avg. Booking Value",
                value: metrics::average_booking_value(stats).to_string(),
                caption: "Per completed booking".to_string(),
            },
            StatCard {
                label: "Active Nannies",
                value: metrics::active_nannies(stats).to_string(),
                caption: "Verified nannies".to_string(),
            },
        ];

        let summaries = vec![
            SummaryBlock {
                title: "Revenue Summary",
                rows: vec![
                    ("Total", stats.revenue.total.to_string()),
                    ("This Month", stats.revenue.month.to_string()),
                    ("This Week", stats.revenue.week.to_string()),
                ],
            },
            SummaryBlock {
                title: "Booking Summary",
                rows: vec![
                    ("Total", stats.bookings.total.to_string()),
                    ("Completed", stats.bookings.completed.to_string()),
                    ("Pending", stats.bookings.pending.to_string()),
                    ("Cancelled", stats.bookings.cancelled.to_string()),
                ],
            },
            SummaryBlock {
                title: "User Summary",
                rows: vec![
                    ("Total Users", stats.users.total.to_string()),
                    ("Parents", stats.users.total_parents.to_string()),
                    ("Nannies", stats.users.total_nannies.to_string()),
                    ("New Today", stats.users.new_users_today.to_string()),
                ],
            },
        ];

        Self {
            metrics,
            revenue_trend: stats
                .booking_trend
                .iter()
                .map(|p| TrendRow {
                    date: format::trend_day(&p.date),
                    bookings: p.count,
                    revenue: p.revenue.to_string(),
                })
                .collect(),
            registrations: metrics::registrations_by_day(&stats.user_trend)
                .into_iter()
                .map(|day| RegistrationDay {
                    date: format::trend_day(&day.date),
                    ..day
                })
                .collect(),
            summaries,
        }
    }
}

/// Analytics template.
#[derive(Template)]
#[template(path = "analytics.html")]
pub struct AnalyticsTemplate {
    pub shell: ShellView,
    pub analytics: Option<AnalyticsView>,
    pub error: Option<String>,
}

/// Build the analytics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/analytics", get(analytics))
}

/// Analytics page handler.
///
/// GET /analytics
#[instrument(skip(admin, state))]
pub async fn analytics(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Html<String> {
    let (analytics, error) = match state.backend().stats().await {
        Ok(stats) => (Some(AnalyticsView::from(&stats)), None),
        Err(e) => {
            tracing::error!("Failed to fetch analytics stats: {e}");
            (None, Some(e.user_message()))
        }
    };

    render(&AnalyticsTemplate {
        shell: ShellView::new(&admin, "/analytics"),
        analytics,
        error,
    })
}
