//! Router-level tests.
//!
//! Each test builds the full application, sends requests with
//! `tower::ServiceExt::oneshot` and carries the session cookie from one
//! response to the next request, the way a browser would.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, LazyLock};

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use hafiz_sajid_storefront::{
    app,
    config::StorefrontConfig,
    forms::{ContactSubmission, LoginSubmission},
    services::{
        AdminIdentity, AuthError, Authenticator, BoxFuture, ContactSubmitter,
        PasswordHashAuthenticator, SubmissionReceipt, SubmitError, auth::hash_password,
    },
    state::AppState,
};
use tokio::sync::Notify;
use tower::ServiceExt;

static ADMIN_HASH: LazyLock<String> = LazyLock::new(|| hash_password("admin123").unwrap());

fn config() -> StorefrontConfig {
    StorefrontConfig::from_lookup(|key| match key {
        "STOREFRONT_BASE_URL" => Some("http://localhost:3000".to_string()),
        "ADMIN_EMAIL" => Some("admin@hafizsajid.com".to_string()),
        "ADMIN_PASSWORD_HASH" => Some(ADMIN_HASH.clone()),
        "CONTACT_SUBMIT_DELAY_MS" | "LOGIN_SUBMIT_DELAY_MS" => Some("0".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

// =============================================================================
// Test doubles
// =============================================================================

/// Accepts every message immediately.
struct AcceptingSubmitter;

impl ContactSubmitter for AcceptingSubmitter {
    fn submit<'a>(
        &'a self,
        _submission: &'a ContactSubmission,
    ) -> BoxFuture<'a, Result<SubmissionReceipt, SubmitError>> {
        Box::pin(async {
            Ok(SubmissionReceipt {
                reference: uuid::Uuid::nil(),
            })
        })
    }
}

/// Refuses every message.
struct FailingSubmitter;

impl ContactSubmitter for FailingSubmitter {
    fn submit<'a>(
        &'a self,
        _submission: &'a ContactSubmission,
    ) -> BoxFuture<'a, Result<SubmissionReceipt, SubmitError>> {
        Box::pin(async { Err(SubmitError::Unavailable("mail relay down".to_string())) })
    }
}

/// Holds every message until released.
struct BlockingSubmitter {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl ContactSubmitter for BlockingSubmitter {
    fn submit<'a>(
        &'a self,
        _submission: &'a ContactSubmission,
    ) -> BoxFuture<'a, Result<SubmissionReceipt, SubmitError>> {
        Box::pin(async move {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(SubmissionReceipt {
                reference: uuid::Uuid::nil(),
            })
        })
    }
}

/// Reports the backend as unreachable.
struct UnavailableAuthenticator;

impl Authenticator for UnavailableAuthenticator {
    fn authenticate<'a>(
        &'a self,
        _credentials: &'a LoginSubmission,
    ) -> BoxFuture<'a, Result<AdminIdentity, AuthError>> {
        Box::pin(async { Err(AuthError::Unavailable("directory offline".to_string())) })
    }
}

fn default_authenticator(config: &StorefrontConfig) -> Arc<dyn Authenticator> {
    Arc::new(PasswordHashAuthenticator::new(
        config.admin.clone(),
        std::time::Duration::ZERO,
    ))
}

// =============================================================================
// Client
// =============================================================================

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl TestResponse {
    fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

/// A browser-like client: keeps the session cookie between requests.
#[derive(Clone)]
struct Client {
    router: Router,
    cookie: Option<String>,
}

impl Client {
    fn new() -> Self {
        Self::with_state(AppState::new(config()))
    }

    fn with_submitter(submitter: Arc<dyn ContactSubmitter>) -> Self {
        let config = config();
        let authenticator = default_authenticator(&config);
        Self::with_state(AppState::with_services(config, submitter, authenticator))
    }

    fn with_state(state: AppState) -> Self {
        Self {
            router: app(state),
            cookie: None,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let (mut parts, body) = request.into_parts();
        if let Some(cookie) = &self.cookie {
            parts
                .headers
                .insert(header::COOKIE, cookie.parse().unwrap());
        }
        parts
            .headers
            .insert("x-forwarded-for", "203.0.113.7".parse().unwrap());

        let response = self
            .router
            .clone()
            .oneshot(Request::from_parts(parts, body))
            .await
            .unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post_form(&mut self, uri: &str, form: &[(&str, &str)]) -> TestResponse {
        self.send(form_request(uri, form, false)).await
    }

    async fn post_fragment(&mut self, uri: &str, form: &[(&str, &str)]) -> TestResponse {
        self.send(form_request(uri, form, true)).await
    }

    async fn sign_in(&mut self) {
        let response = self
            .post_form(
                "/admin/login",
                &[("email", "admin@hafizsajid.com"), ("password", "admin123")],
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location(), "/admin/dashboard");
    }
}

fn form_request(uri: &str, form: &[(&str, &str)], fragment: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if fragment {
        builder = builder.header("hx-request", "true");
    }
    builder
        .body(Body::from(serde_urlencoded::to_string(form).unwrap()))
        .unwrap()
}

fn valid_contact() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Muhammad Ali"),
        ("email", "ali@example.com"),
        ("phone", "300-123-4567"),
        ("subject", "Bulk order"),
        ("message", "I need vaccines for 2000 birds."),
        ("preferred_contact", "phone"),
        ("department", "sales"),
    ]
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_health() {
    let mut client = Client::new();
    let response = client.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_home_page() {
    let mut client = Client::new();
    let response = client.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Featured Products"));
    assert!(response.body.contains("Growth Accelerator"));
    assert!(!response.body.contains("Newcastle Vaccine"));
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_security_headers_carry_script_nonce() {
    let mut client = Client::new();
    let response = client.get("/about").await;
    assert_eq!(response.status, StatusCode::OK);

    let csp = response
        .headers
        .get("content-security-policy")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(csp.contains("script-src 'self' 'nonce-"));
    assert!(response.body.contains("nonce=\""));
    assert_eq!(response.headers.get("x-frame-options").unwrap(), "DENY");
}

#[tokio::test]
async fn test_products_filter_by_category() {
    let mut client = Client::new();
    let response = client.get("/products?category=vitamins").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Vitamin Complex Gold"));
    assert!(!response.body.contains("Antibiotic Plus"));
    assert!(response.body.contains("Clear all (1)"));
}

#[tokio::test]
async fn test_price_ceiling_above_catalog_is_not_a_filter() {
    let mut client = Client::new();
    let response = client.get("/products?max_price=2000").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("Clear all ("));
    assert!(response.body.contains("Newcastle Vaccine"));

    let response = client.get("/products?max_price=1000").await;
    assert!(response.body.contains("Clear all (1)"));
}

#[tokio::test]
async fn test_products_search_without_matches() {
    let mut client = Client::new();
    let response = client.get("/products?q=zzzz").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("No products found"));
}

#[tokio::test]
async fn test_product_detail_and_missing_product() {
    let mut client = Client::new();
    let response = client.get("/products/4").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Growth Accelerator"));

    let response = client.get("/products/99").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quick_view_is_a_fragment() {
    let mut client = Client::new();
    let response = client.get("/products/2/quick-view").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Vitamin Complex Gold"));
    assert!(!response.body.contains("<html"));
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_redirects_with_notice() {
    let mut client = Client::new();
    let response = client
        .post_form("/cart/add", &[("product_id", "1"), ("quantity", "2")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/cart");

    let page = client.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Poultry Shield Pro added to cart!"));
    assert!(page.body.contains("Order Summary"));

    // The notice is shown once.
    let page = client.get("/cart").await;
    assert!(!page.body.contains("added to cart!"));
}

#[tokio::test]
async fn test_fragment_add_returns_badge() {
    let mut client = Client::new();
    let response = client
        .post_fragment("/cart/add", &[("product_id", "6"), ("quantity", "3")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers.get("hx-trigger").unwrap(), "cart-updated");
    assert!(response.body.contains("data-count=\"3\""));

    let count = client.get("/cart/count").await;
    assert!(count.body.contains("data-count=\"3\""));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut client = Client::new();
    let response = client
        .post_fragment("/cart/add", &[("product_id", "42")])
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_coupon_is_reported() {
    let mut client = Client::new();
    client.post_form("/cart/add", &[("product_id", "2")]).await;
    let response = client.post_form("/cart/coupon", &[("code", "FREE99")]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let page = client.get("/cart").await;
    assert!(page.body.contains("Invalid coupon code"));
}

#[tokio::test]
async fn test_valid_coupon_shows_discount() {
    let mut client = Client::new();
    client.post_form("/cart/add", &[("product_id", "2")]).await;
    client.post_form("/cart/coupon", &[("code", "save10")]).await;

    let page = client.get("/cart").await;
    assert!(page.body.contains("Coupon SAVE10 applied successfully!"));
    assert!(page.body.contains("Discount"));
}

#[tokio::test]
async fn test_clear_requires_confirmation() {
    let mut client = Client::new();
    client.post_form("/cart/add", &[("product_id", "3")]).await;

    client.post_form("/cart/clear", &[("confirm", "false")]).await;
    let page = client.get("/cart").await;
    assert!(page.body.contains("Are you sure you want to clear your cart?"));
    assert!(page.body.contains("Anti-Stress Formula"));

    client.post_form("/cart/clear", &[("confirm", "true")]).await;
    let page = client.get("/cart").await;
    assert!(page.body.contains("Cart cleared"));
    assert!(page.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_checkout_refuses_empty_cart() {
    let mut client = Client::new();
    let response = client.post_form("/checkout", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/cart");
    let page = client.get("/cart").await;
    assert!(page.body.contains("Your cart is empty!"));

    let response = client.get("/checkout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/cart");
    let page = client.get("/cart").await;
    assert!(page.body.contains("Your cart is empty!"));
}

#[tokio::test]
async fn test_checkout_page_refuses_empty_cart_directly() {
    let mut client = Client::new();
    let response = client.get("/checkout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/cart");

    let page = client.get("/cart").await;
    assert!(page.body.contains("Your cart is empty!"));
}

#[tokio::test]
async fn test_update_below_one_leaves_quantity() {
    let mut client = Client::new();
    client
        .post_form("/cart/add", &[("product_id", "2"), ("quantity", "3")])
        .await;

    for quantity in ["-1", "0"] {
        let response = client
            .post_form("/cart/update", &[("product_id", "2"), ("quantity", quantity)])
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
    }

    let response = client.get("/api/cart").await;
    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["cart"]["items"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_checkout_review() {
    let mut client = Client::new();
    client.post_form("/cart/add", &[("product_id", "5")]).await;
    let response = client.post_form("/checkout", &[]).await;
    assert_eq!(response.location(), "/checkout");

    let page = client.get("/checkout").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Antibiotic Plus"));
    assert!(page.body.contains("Total"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let mut alice = Client::new();
    alice.post_form("/cart/add", &[("product_id", "1")]).await;

    let mut bob = alice.clone();
    bob.cookie = None;
    let page = bob.get("/cart").await;
    assert!(page.body.contains("Your cart is empty"));
}

// =============================================================================
// Contact
// =============================================================================

#[tokio::test]
async fn test_contact_validation_errors() {
    let mut client = Client::with_submitter(Arc::new(AcceptingSubmitter));
    let response = client
        .post_form("/contact", &[("name", "Al"), ("email", "not-an-email")])
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Name must be at least 3 characters"));
    assert!(response.body.contains("Please enter a valid email address"));
    assert!(response.body.contains("Subject is required"));
    assert!(response.body.contains("Message is required"));
}

#[tokio::test]
async fn test_contact_success() {
    let mut client = Client::with_submitter(Arc::new(AcceptingSubmitter));
    let response = client.post_form("/contact", &valid_contact()).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/contact?department=sales");

    let page = client.get(response.location()).await;
    assert!(page.body.contains("Thank you for contacting us!"));
}

#[tokio::test]
async fn test_contact_failure_keeps_input() {
    let mut client = Client::with_submitter(Arc::new(FailingSubmitter));
    let response = client.post_form("/contact", &valid_contact()).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.body.contains("Something went wrong"));
    assert!(response.body.contains("Bulk order"));
}

#[tokio::test]
async fn test_contact_refuses_duplicate_while_pending() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let client = Client::with_submitter(Arc::new(BlockingSubmitter {
        entered: Arc::clone(&entered),
        release: Arc::clone(&release),
    }));

    let mut first = client.clone();
    let pending = tokio::spawn(async move { first.post_form("/contact", &valid_contact()).await });
    entered.notified().await;

    let mut second = client.clone();
    let refused = second.post_form("/contact", &valid_contact()).await;
    assert_eq!(refused.status, StatusCode::CONFLICT);
    assert!(refused.body.contains("still being sent"));

    release.notify_one();
    let accepted = pending.await.unwrap();
    assert_eq!(accepted.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_contact_faq_filter() {
    let mut client = Client::new();
    let page = client.get("/contact?department=all").await;
    assert!(page.body.contains("What payment methods do you accept?"));
    assert!(page.body.contains("How can I get a refund?"));

    let page = client.get("/contact?department=orders").await;
    assert!(page.body.contains("How can I place an order?"));
    assert!(!page.body.contains("How can I get a refund?"));
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_dashboard_requires_sign_in() {
    let mut client = Client::new();
    let response = client.get("/admin/dashboard").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/admin/login");
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let mut client = Client::new();
    let response = client
        .post_form(
            "/admin/login",
            &[("email", "admin@hafizsajid.com"), ("password", "admin124")],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Invalid email or password"));
    assert!(!response.body.contains("admin124"));
}

#[tokio::test]
async fn test_login_validation() {
    let mut client = Client::new();
    let response = client
        .post_form("/admin/login", &[("email", "admin"), ("password", "abc")])
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Please enter a valid email address"));
    assert!(response.body.contains("Password must be at least 6 characters"));
}

#[tokio::test]
async fn test_login_backend_failure() {
    let config = config();
    let state = AppState::with_services(
        config,
        Arc::new(AcceptingSubmitter),
        Arc::new(UnavailableAuthenticator),
    );
    let mut client = Client::with_state(state);
    let response = client
        .post_form(
            "/admin/login",
            &[("email", "admin@hafizsajid.com"), ("password", "admin123")],
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("An error occurred. Please try again."));
}

#[tokio::test]
async fn test_sign_in_dashboard_and_sign_out() {
    let mut client = Client::new();
    client.sign_in().await;

    let page = client.get("/admin/dashboard").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Welcome back, Hafiz Sajid!"));
    assert!(page.body.contains("Recent Orders"));
    assert!(page.body.contains("ORD-005"));

    let page = client.get("/admin/dashboard?tab=customers&period=year").await;
    assert!(page.body.contains("customer6@email.com"));
    assert!(page.body.contains("This Year"));

    let response = client.post_form("/admin/logout", &[]).await;
    assert_eq!(response.location(), "/admin/login");
    let response = client.get("/admin/dashboard").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_admin_actions_report_without_changes() {
    let mut client = Client::new();
    client.sign_in().await;

    let response = client
        .post_fragment("/admin/products/2/delete", &[("confirm", "false")])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = client
        .post_fragment("/admin/products/2/delete", &[("confirm", "true")])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Product 2 deleted successfully!"));

    let response = client.post_fragment("/admin/orders/ORD-003/view", &[]).await;
    assert!(response.body.contains("Viewing order: ORD-003"));

    let response = client
        .post_fragment("/admin/customers/4/view", &[])
        .await;
    assert!(response.body.contains("Viewing customer details for Customer 4"));

    // Nothing was removed.
    let page = client.get("/products/2").await;
    assert_eq!(page.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_actions_require_sign_in() {
    let mut client = Client::new();
    let response = client
        .post_fragment("/admin/products/1/restock", &[])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/admin/login");
}

// =============================================================================
// JSON API
// =============================================================================

#[tokio::test]
async fn test_api_products_page() {
    let mut client = Client::new();
    let response = client
        .get("/api/products?category=supplements&sort=price-low")
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["total_items"], 3);
    assert_eq!(json["page"], 1);
    assert_eq!(json["items"][0]["name"], "Anti-Stress Formula");
}

#[tokio::test]
async fn test_api_cart() {
    let mut client = Client::new();
    client
        .post_form("/cart/add", &[("product_id", "6"), ("quantity", "2")])
        .await;
    let response = client.get("/api/cart").await;
    assert_eq!(response.status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(json["cart"]["items"][0]["quantity"], 2);
    assert_eq!(json["summary"]["item_count"], 2);
}
