//! List pages: paging, filter tabs, merged provider lists and read-only
//! pages rendering backend data.

use wecare_integration_tests::{MISSING_BOOKING, MISSING_USER, TestContext};

#[tokio::test]
async fn test_users_page_forwards_paging() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (_, body) = ctx.get("/users?page=2&search=anita").await;
    assert!(body.contains("Anita Desai"));

    assert_eq!(ctx.backend.count("GET", "/api/admin/users"), 1);
    let query = ctx
        .backend
        .calls()
        .into_iter()
        .find(|c| c.path == "/api/admin/users")
        .and_then(|c| c.query)
        .unwrap_or_default();
    assert!(query.contains("page=2"), "query was {query}");
    assert!(query.contains("search=anita"), "query was {query}");
}

#[tokio::test]
async fn test_filter_tabs_reset_to_first_page() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (_, body) = ctx.get("/users?page=3").await;
    assert!(body.contains("href=\"/users?page=1&amp;role=nanny\""));
    assert!(body.contains("href=\"/users?page=1\""));
    assert!(!body.contains("page=3&amp;role="));
}

#[tokio::test]
async fn test_provider_lists_merge_without_duplicates() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (_, body) = ctx.get("/providers?tab=daycare").await;
    assert_eq!(body.matches("Sunshine Daycare").count(), 1);
    assert!(body.contains("Little Stars"));
    assert!(body.contains("Rainbow Kids"));
    assert!(body.contains("Daycare (3)"));
    // The decided copy wins over the stale pending one.
    assert_eq!(body.matches(">approved</span>").count(), 2);
    assert_eq!(body.matches(">pending</span>").count(), 1);
}

#[tokio::test]
async fn test_provider_search_narrows_list() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (_, body) = ctx.get("/providers?tab=daycare&search=rainbow").await;
    assert!(body.contains("Rainbow Kids"));
    assert!(!body.contains("Little Stars"));
}

#[tokio::test]
async fn test_read_only_pages_render() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (_, body) = ctx.get("/bookings").await;
    assert!(body.contains("WC00000001"));

    let (_, body) = ctx.get("/bookings/b1").await;
    assert!(body.contains("Lakshmi Iyer"));
    assert!(body.contains("name=\"reason\""));

    let (_, body) = ctx.get("/reviews").await;
    assert!(body.contains("Wonderful with our daughter"));

    let (_, body) = ctx.get("/analytics").await;
    assert!(body.contains("Completion Rate"));

    let (_, body) = ctx.get("/settings").await;
    assert!(body.contains("Server Online"));
    assert_eq!(ctx.backend.count("GET", "/health"), 1);

    assert_eq!(ctx.backend.writes(), 1, "only the login should have been sent");
}

#[tokio::test]
async fn test_unavailable_detail_renders_in_shell() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, body) = ctx.get(&format!("/bookings/{MISSING_BOOKING}")).await;
    assert_eq!(path, format!("/bookings/{MISSING_BOOKING}"));
    assert!(body.contains("<h1>Booking Details</h1>"));
    assert!(body.contains("Booking not found"));
    assert!(body.contains(&format!("<a href=\"/bookings/{MISSING_BOOKING}\">Retry</a>")));
    assert!(body.contains(">Dashboard</a>"), "sidebar should still render");

    let (_, body) = ctx.get(&format!("/users/{MISSING_USER}")).await;
    assert!(body.contains("<h1>User Details</h1>"));
    assert!(body.contains("User not found"));
    assert!(body.contains(&format!("<a href=\"/users/{MISSING_USER}\">Retry</a>")));
}

#[tokio::test]
async fn test_decided_provider_in_pending_list_has_no_actions() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (_, body) = ctx.get("/approvals?tab=eldercare").await;
    assert!(body.contains("Sunita Menon"));
    assert!(!body.contains("action=\"/approvals/eldercare/ec2\""));

    // Pending daycares keep their forms.
    let (_, body) = ctx.get("/approvals?tab=daycare").await;
    assert!(body.contains("action=\"/approvals/daycare/dc3\""));
}
