//! End-to-end tests for the WeCare admin panel.
//!
//! Each test starts two servers on ephemeral ports inside the test process:
//!
//! - a fake WeCare backend serving canned JSON in the backend's envelope
//!   format and recording every request it receives
//! - the real admin panel router, pointed at the fake backend
//!
//! Tests then drive the panel over HTTP with a cookie-keeping client, the
//! way a browser would, and assert on both the rendered pages and the
//! requests that did (or did not) reach the backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wecare-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use wecare_admin::config::AdminConfig;
use wecare_admin::state::AppState;

/// Phone number the fake backend accepts.
pub const ADMIN_PHONE: &str = "+919999999999";

/// PIN the fake backend accepts.
pub const ADMIN_PIN: &str = "1234";

/// Booking whose status change the backend refuses.
pub const STALE_BOOKING: &str = "b2";
pub const STALE_BOOKING_MESSAGE: &str = "Booking is no longer pending";

/// Daycare whose verification the backend refuses.
pub const STALE_PROVIDER: &str = "dc1";
pub const STALE_PROVIDER_MESSAGE: &str = "Provider is no longer pending";

/// Ids the backend reports as not found.
pub const MISSING_BOOKING: &str = "b9";
pub const MISSING_USER: &str = "u9";

/// A request the fake backend received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Mutex<Vec<RecordedCall>>,
    pending_nannies: Mutex<Vec<Value>>,
}

impl FakeState {
    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

/// Handle on the running fake backend.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    pub url: String,
    state: Arc<FakeState>,
}

impl FakeBackend {
    /// Start the fake backend on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let state = Arc::new(FakeState {
            calls: Mutex::new(Vec::new()),
            pending_nannies: Mutex::new(vec![
                nanny("n1", "Priya Sharma", "+919876500001"),
                nanny("n2", "Kavita Rao", "+919876500002"),
            ]),
        });

        let api = Router::new()
            .route("/admin/login", post(login))
            .route("/admin/create", post(create_admin))
            .route("/admin/stats", get(stats))
            .route("/admin/users", get(users))
            .route("/admin/users/{id}", get(user).put(ack).delete(ack))
            .route("/admin/users/{id}/toggle-status", put(ack))
            .route("/admin/users/{id}/verify-nanny", put(verify_nanny))
            .route("/admin/bookings", get(bookings))
            .route("/admin/bookings/{id}", get(booking))
            .route("/admin/bookings/{id}/status", put(booking_status))
            .route("/admin/reviews", get(reviews))
            .route("/providers/daycare", get(daycares))
            .route("/providers/daycare/pending/list", get(pending_daycares))
            .route("/providers/daycare/{id}/verify", put(verify_daycare))
            .route("/providers/eldercare", get(caregivers))
            .route("/providers/eldercare/pending/list", get(pending_caregivers))
            .route("/providers/eldercare/{id}/verify", put(ack))
            .route("/notifications/send-to-user", post(notified))
            .route("/notifications/send-to-role", post(notified))
            .route("/notifications/broadcast", post(notified));

        let app = Router::new()
            .route("/health", get(health))
            .nest("/api", api)
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let url = spawn(app).await;
        Self { url, state }
    }

    /// Base URL the admin panel should use (`.../api`).
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}/api", self.url)
    }

    /// Every request received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `method` requests received for exactly `path`.
    #[must_use]
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    /// Number of write requests (anything but GET) received so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.calls().iter().filter(|c| c.method != "GET").count()
    }
}

/// A running admin panel wired to a fresh fake backend.
pub struct TestContext {
    pub client: Client,
    pub admin_url: String,
    pub backend: FakeBackend,
}

impl TestContext {
    /// Start a fake backend and an admin panel in front of it.
    ///
    /// # Panics
    ///
    /// Panics if either server cannot start.
    pub async fn start() -> Self {
        let backend = FakeBackend::start().await;
        let config = AdminConfig::for_backend(&backend.api_url()).expect("fake backend URL");
        let state = AppState::new(config).expect("backend client");
        let admin_url = spawn(wecare_admin::app(state)).await;

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            admin_url,
            backend,
        }
    }

    /// Absolute URL of a panel page.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// GET a panel page and return its final URL path (after redirects)
    /// and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> (String, String) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request");
        Self::read(response).await
    }

    /// POST a form to a panel page, following the redirect.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> (String, String) {
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request");
        Self::read(response).await
    }

    /// Sign in with the credentials the fake backend accepts.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn login(&self) -> (String, String) {
        self.post_form(
            "/auth/login",
            &[("phone_number", ADMIN_PHONE), ("pin", ADMIN_PIN)],
        )
        .await
    }

    async fn read(response: reqwest::Response) -> (String, String) {
        let path = response.url().path().to_string();
        let body = response.text().await.expect("response body");
        (path, body)
    }
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move { axum::serve(listener, app).await });
    format!("http://{addr}")
}

// =============================================================================
// Fake backend handlers
// =============================================================================

async fn record(State(state): State<Arc<FakeState>>, request: Request, next: Next) -> Response {
    state.record(RecordedCall {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(ToOwned::to_owned),
    });
    next.run(request).await
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "timestamp": "2026-10-19T08:30:15.000Z"}))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["phoneNumber"] == ADMIN_PHONE && body["pin"] == ADMIN_PIN {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "admin": {
                    "_id": "a1",
                    "name": "Test Admin",
                    "phoneNumber": ADMIN_PHONE,
                    "role": "admin"
                }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid phone number or PIN"})),
        )
    }
}

async fn create_admin(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "success": true,
        "admin": {
            "_id": "a2",
            "name": body["name"],
            "phoneNumber": body["phoneNumber"],
            "role": "admin"
        }
    }))
}

async fn ack() -> Json<Value> {
    Json(json!({"success": true}))
}

async fn notified() -> Json<Value> {
    Json(json!({"success": true, "message": "Notification queued"}))
}

async fn stats() -> Json<Value> {
    Json(json!({
        "success": true,
        "stats": {
            "users": {
                "total": 120, "totalParents": 80, "totalNannies": 38,
                "pendingNannies": 2, "newUsersToday": 3, "newUsersWeek": 11
            },
            "bookings": {
                "total": 50, "pending": 5, "confirmed": 10,
                "completed": 30, "cancelled": 5, "today": 2
            },
            "revenue": {"total": 150_000, "month": 42_000, "week": 9_500},
            "bookingTrend": [
                {"_id": "2026-10-17", "count": 4, "revenue": 3200},
                {"_id": "2026-10-18", "count": 6, "revenue": 4800}
            ],
            "userTrend": [
                {"_id": {"date": "2026-10-18", "role": "parent"}, "count": 2},
                {"_id": {"date": "2026-10-18", "role": "nanny"}, "count": 1}
            ],
            "topNannies": [],
            "recentBookings": [booking_json("b1")]
        }
    }))
}

async fn users(
    State(state): State<Arc<FakeState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    if params.get("verified").map(String::as_str) == Some("false") {
        let pending = state
            .pending_nannies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let total = pending.len();
        return Json(json!({
            "success": true,
            "users": pending,
            "pagination": {"total": total, "page": 1, "pages": 1}
        }));
    }

    let page: u32 = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    Json(json!({
        "success": true,
        "users": [
            {
                "_id": "p1", "name": "Anita Desai", "phoneNumber": "+919800000001",
                "role": "parent", "isVerified": true, "createdAt": "2026-09-01T10:00:00.000Z"
            },
            {
                "_id": "a1", "name": "Test Admin", "phoneNumber": ADMIN_PHONE,
                "role": "admin", "isVerified": true
            }
        ],
        "pagination": {"total": 45, "page": page, "pages": 3}
    }))
}

async fn user(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == MISSING_USER {
        return rejected(StatusCode::NOT_FOUND, "User not found");
    }
    let user = if id == "a1" {
        json!({"_id": id, "name": "Test Admin", "phoneNumber": ADMIN_PHONE, "role": "admin"})
    } else {
        json!({
            "_id": id, "name": "Anita Desai", "phoneNumber": "+919800000001",
            "role": "parent", "isVerified": true
        })
    };
    let body = json!({
        "success": true,
        "user": user,
        "bookingStats": {"totalBookings": 1, "completedBookings": 0, "cancelledBookings": 0},
        "recentBookings": [booking_json("b1")]
    });
    (StatusCode::OK, Json(body))
}

async fn verify_nanny(
    State(state): State<Arc<FakeState>>,
    Path(id): Path<String>,
) -> Json<Value> {
    state
        .pending_nannies
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .retain(|n| n["_id"] != id.as_str());
    Json(json!({"success": true, "message": "Nanny verification updated"}))
}

async fn bookings() -> Json<Value> {
    Json(json!({
        "success": true,
        "bookings": [booking_json("b1")],
        "pagination": {"total": 1, "page": 1, "pages": 1}
    }))
}

async fn booking(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == MISSING_BOOKING {
        return rejected(StatusCode::NOT_FOUND, "Booking not found");
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "booking": booking_json(&id)})),
    )
}

async fn booking_status(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == STALE_BOOKING {
        return rejected(StatusCode::CONFLICT, STALE_BOOKING_MESSAGE);
    }
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn verify_daycare(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == STALE_PROVIDER {
        return rejected(StatusCode::CONFLICT, STALE_PROVIDER_MESSAGE);
    }
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn reviews() -> Json<Value> {
    Json(json!({
        "success": true,
        "reviews": [{
            "_id": "r1",
            "rating": 5,
            "comment": "Wonderful with our daughter",
            "parentId": {"_id": "p1", "name": "Anita Desai"},
            "nannyId": {"_id": "n3", "name": "Lakshmi Iyer"},
            "bookingId": {"bookingId": "WC00000001"},
            "createdAt": "2026-10-10T12:00:00.000Z"
        }],
        "pagination": {"total": 1, "page": 1, "pages": 1}
    }))
}

async fn daycares() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {"daycares": [
            daycare("dc1", "Sunshine Daycare", "approved"),
            daycare("dc2", "Little Stars", "approved")
        ]}
    }))
}

async fn pending_daycares() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {"providers": [
            daycare("dc1", "Sunshine Daycare", "pending"),
            daycare("dc3", "Rainbow Kids", "pending")
        ]}
    }))
}

async fn caregivers() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {"caregivers": [{
            "_id": "ec1", "name": "Ramesh Kumar", "experience": 6,
            "phoneNumber": "+919800000020", "verificationStatus": "approved"
        }]}
    }))
}

async fn pending_caregivers() -> Json<Value> {
    // The pending list can lag behind a decision made elsewhere.
    Json(json!({
        "success": true,
        "data": {"providers": [{
            "_id": "ec2", "name": "Sunita Menon", "experience": 4,
            "phoneNumber": "+919800000021", "verificationStatus": "approved"
        }]}
    }))
}

// =============================================================================
// Fixtures
// =============================================================================

fn nanny(id: &str, name: &str, phone: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "phoneNumber": phone,
        "role": "nanny",
        "isVerified": false,
        "createdAt": "2026-10-15T09:00:00.000Z",
        "nannyProfile": {"experience": 3, "hourlyRate": 250, "isVerifiedNanny": false}
    })
}

fn daycare(id: &str, name: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "centerName": name,
        "ownerName": "Meera Joshi",
        "totalCapacity": 25,
        "phoneNumber": "+919800000010",
        "address": {"city": "Pune"},
        "verificationStatus": status
    })
}

fn rejected(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"success": false, "message": message})))
}

fn booking_json(id: &str) -> Value {
    json!({
        "_id": id,
        "bookingId": "WC00000001",
        "parentId": {"_id": "p1", "name": "Anita Desai", "phoneNumber": "+919800000001"},
        "nannyId": {"_id": "n3", "name": "Lakshmi Iyer", "phoneNumber": "+919800000003"},
        "date": "2026-10-20T00:00:00.000Z",
        "startTime": "09:00",
        "endTime": "13:00",
        "totalHours": 4,
        "hourlyRate": 250,
        "totalAmount": 1000,
        "status": "pending",
        "createdAt": "2026-10-18T10:15:00.000Z"
    })
}
