//! Review browsing.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use tracing::instrument;

use wecare_core::{ListQuery, NoFilter, PAGE_SIZE};

use crate::{
    api::{Review, person_name},
    filters,
    middleware::RequireAdminAuth,
    state::AppState,
};

use super::{ListParams, PagerView, format, render, shell::ShellView};

const BASE: &str = "/reviews";

#[derive(Debug, Clone)]
pub struct ReviewView {
    pub stars: u8,
    pub comment: String,
    pub parent: String,
    pub nanny: String,
    pub booking_code: String,
    pub date: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            stars: review.stars(),
            comment: review
                .comment
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "No comment".to_string()),
            parent: person_name(review.parent_id.as_ref(), "Parent"),
            nanny: person_name(review.nanny_id.as_ref(), "Nanny"),
            booking_code: review.booking_code().unwrap_or_else(|| "-".to_string()),
            date: format::date(review.created_at),
        }
    }
}

/// Reviews template.
#[derive(Template)]
#[template(path = "reviews.html")]
pub struct ReviewsTemplate {
    pub shell: ShellView,
    pub reviews: Vec<ReviewView>,
    pub pager: Option<PagerView>,
    pub error: Option<String>,
}

/// Build the reviews router.
pub fn router() -> Router<AppState> {
    Router::new().route("/reviews", get(index))
}

/// Reviews page handler.
///
/// GET /reviews
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Html<String> {
    let query: ListQuery<NoFilter> = params.to_query(PAGE_SIZE, None);

    let (reviews, pager, error) = match state.backend().list_reviews(&query).await {
        Ok(page) => (
            page.reviews.iter().map(ReviewView::from).collect(),
            Some(PagerView::new(&query, &page.pagination, BASE)),
            None,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch reviews: {e}");
            (vec![], None, Some(e.user_message()))
        }
    };

    render(&ReviewsTemplate {
        shell: ShellView::new(&admin, BASE),
        reviews,
        pager,
        error,
    })
}
