//! Sign-in, sign-out and session guarding.

use wecare_integration_tests::{ADMIN_PHONE, TestContext};

#[tokio::test]
async fn test_pages_redirect_to_login_without_session() {
    let ctx = TestContext::start().await;

    for page in ["/", "/users", "/bookings/b1", "/notifications", "/settings"] {
        let (path, body) = ctx.get(page).await;
        assert_eq!(path, "/auth/login", "{page} should require a session");
        assert!(body.contains("name=\"pin\""));
    }
    assert!(ctx.backend.calls().is_empty());
}

#[tokio::test]
async fn test_login_lands_on_dashboard() {
    let ctx = TestContext::start().await;

    let (path, body) = ctx.login().await;
    assert_eq!(path, "/");
    assert!(body.contains("<h1>Dashboard</h1>"));
    assert!(body.contains("Test Admin"));
    assert_eq!(ctx.backend.count("POST", "/api/admin/login"), 1);
    assert_eq!(ctx.backend.count("GET", "/api/admin/stats"), 1);

    // Already signed in: the login page bounces back to the dashboard.
    let (path, _) = ctx.get("/auth/login").await;
    assert_eq!(path, "/");
}

#[tokio::test]
async fn test_wrong_pin_shows_backend_reason() {
    let ctx = TestContext::start().await;

    let (path, body) = ctx
        .post_form("/auth/login", &[("phone_number", ADMIN_PHONE), ("pin", "9999")])
        .await;
    assert_eq!(path, "/auth/login");
    assert!(body.contains("Invalid phone number or PIN"));

    let (path, _) = ctx.get("/").await;
    assert_eq!(path, "/auth/login");
}

#[tokio::test]
async fn test_malformed_pin_never_reaches_backend() {
    let ctx = TestContext::start().await;

    let (_, body) = ctx
        .post_form("/auth/login", &[("phone_number", ADMIN_PHONE), ("pin", "12")])
        .await;
    assert!(body.contains("PIN must be exactly 4 digits"));
    assert_eq!(ctx.backend.count("POST", "/api/admin/login"), 0);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let ctx = TestContext::start().await;
    ctx.login().await;

    let (path, _) = ctx.post_form("/auth/logout", &[]).await;
    assert_eq!(path, "/auth/login");

    let (path, _) = ctx.get("/users").await;
    assert_eq!(path, "/auth/login");
}
