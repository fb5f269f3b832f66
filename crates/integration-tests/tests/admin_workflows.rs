//! Admin actions: invalid input is refused in the panel and never reaches
//! the backend; valid input is sent once and the page reflects the outcome.

use wecare_integration_tests::{
    MISSING_USER, STALE_BOOKING, STALE_BOOKING_MESSAGE, STALE_PROVIDER, STALE_PROVIDER_MESSAGE,
    TestContext,
};

#[tokio::test]
async fn test_cancel_without_reason_sends_nothing() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, body) = ctx
        .post_form(
            "/bookings/b1/status",
            &[("action", "cancel"), ("status", "pending"), ("reason", "   ")],
        )
        .await;
    assert_eq!(path, "/bookings/b1");
    assert!(body.contains("A cancellation reason is required"));
    assert_eq!(ctx.backend.count("PUT", "/api/admin/bookings/b1/status"), 0);
    assert_eq!(ctx.backend.writes(), 1, "only the login should have been sent");
}

#[tokio::test]
async fn test_cancel_with_reason_is_sent() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, _) = ctx
        .post_form(
            "/bookings/b1/status",
            &[
                ("action", "cancel"),
                ("status", "pending"),
                ("reason", "Parent requested"),
            ],
        )
        .await;
    assert_eq!(path, "/bookings/b1");
    assert_eq!(ctx.backend.count("PUT", "/api/admin/bookings/b1/status"), 1);
}

#[tokio::test]
async fn test_approve_provider_without_price_sends_nothing() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, body) = ctx
        .post_form(
            "/approvals/daycare/dc3",
            &[("decision", "approve"), ("status", "pending"), ("price", "")],
        )
        .await;
    assert_eq!(path, "/approvals");
    assert!(body.contains("An estimated price is required to approve this provider"));
    assert_eq!(ctx.backend.count("PUT", "/api/providers/daycare/dc3/verify"), 0);
}

#[tokio::test]
async fn test_approve_provider_with_price_is_sent() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    ctx.post_form(
        "/approvals/daycare/dc3",
        &[("decision", "approve"), ("status", "pending"), ("price", "8000")],
    )
    .await;
    assert_eq!(ctx.backend.count("PUT", "/api/providers/daycare/dc3/verify"), 1);
}

#[tokio::test]
async fn test_approved_nanny_leaves_queue() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (_, body) = ctx.get("/approvals").await;
    assert!(body.contains("Priya Sharma"));
    assert!(body.contains("Kavita Rao"));

    let (path, body) = ctx
        .post_form(
            "/approvals/nannies/n1",
            &[("decision", "approve"), ("verified", "false")],
        )
        .await;
    assert_eq!(path, "/approvals");
    assert!(body.contains("Nanny verification updated"));
    assert!(!body.contains("Priya Sharma"));
    assert!(body.contains("Kavita Rao"));
    assert_eq!(ctx.backend.count("PUT", "/api/admin/users/n1/verify-nanny"), 1);
}

#[tokio::test]
async fn test_empty_broadcast_title_sends_nothing() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, body) = ctx
        .post_form(
            "/notifications",
            &[("mode", "broadcast"), ("title", "  "), ("body", "Hello everyone")],
        )
        .await;
    assert_eq!(path, "/notifications");
    assert!(body.contains("Title is required"));
    assert!(body.contains("Hello everyone"), "draft should be kept");
    assert_eq!(ctx.backend.count("POST", "/api/notifications/broadcast"), 0);
}

#[tokio::test]
async fn test_role_notification_is_sent() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, body) = ctx
        .post_form(
            "/notifications",
            &[
                ("mode", "role"),
                ("role", "nanny"),
                ("title", "New bookings"),
                ("body", "Check the app for new requests"),
            ],
        )
        .await;
    assert_eq!(path, "/notifications");
    assert!(body.contains("Notification queued"));
    assert_eq!(ctx.backend.count("POST", "/api/notifications/send-to-role"), 1);
}

#[tokio::test]
async fn test_admin_accounts_cannot_be_deleted() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, body) = ctx
        .post_form("/users/a1/delete", &[("return_to", "/users")])
        .await;
    assert_eq!(path, "/users");
    assert!(body.contains("Admin accounts cannot be deleted"));
    assert_eq!(ctx.backend.count("DELETE", "/api/admin/users/a1"), 0);
}

#[tokio::test]
async fn test_refused_booking_transition_keeps_state() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, body) = ctx
        .post_form(
            &format!("/bookings/{STALE_BOOKING}/status"),
            &[("action", "confirm"), ("status", "pending"), ("reason", "")],
        )
        .await;
    assert_eq!(path, format!("/bookings/{STALE_BOOKING}"));
    assert!(body.contains(STALE_BOOKING_MESSAGE));
    assert!(!body.contains("Booking confirmed"));
    assert_eq!(
        ctx.backend
            .count("PUT", &format!("/api/admin/bookings/{STALE_BOOKING}/status")),
        1
    );

    // The reloaded page still shows the old status and its actions.
    assert!(body.contains(">Pending</span>"));
    assert!(body.contains(&format!("action=\"/bookings/{STALE_BOOKING}/status\"")));
    assert!(body.contains("value=\"confirm\""));
    assert!(body.contains("value=\"cancel\""));
}

#[tokio::test]
async fn test_refused_provider_decision_keeps_queue() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, body) = ctx
        .post_form(
            &format!("/approvals/daycare/{STALE_PROVIDER}"),
            &[("decision", "approve"), ("status", "pending"), ("price", "8000")],
        )
        .await;
    assert_eq!(path, "/approvals");
    assert!(body.contains(STALE_PROVIDER_MESSAGE));
    assert_eq!(
        ctx.backend
            .count("PUT", &format!("/api/providers/daycare/{STALE_PROVIDER}/verify")),
        1
    );

    // Still pending, still actionable.
    assert!(body.contains("Sunshine Daycare"));
    assert!(body.contains(&format!("action=\"/approvals/daycare/{STALE_PROVIDER}\"")));
}

#[tokio::test]
async fn test_delete_with_failed_lookup_redirects_with_message() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, body) = ctx
        .post_form(
            &format!("/users/{MISSING_USER}/delete"),
            &[("return_to", "/users")],
        )
        .await;
    assert_eq!(path, "/users");
    assert!(body.contains("User not found"));
    assert_eq!(
        ctx.backend
            .count("DELETE", &format!("/api/admin/users/{MISSING_USER}")),
        0
    );
}
