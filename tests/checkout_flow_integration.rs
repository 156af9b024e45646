//! End-to-end tests of the checkout flow against a simulated Nelo API.
//!
//! The real `NeloCheckoutGateway` talks to a `wiremock` server; requests go
//! through the full application router:
//! 1. Session creation returns the provider's redirect URL
//! 2. The confirm redirect runs auth + capture and finalizes the order once
//! 3. Provider failures never leak into HTTP responses

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nelo_checkout::adapters::{
    app_router, InMemoryAcquirerStore, InMemoryTransactionRepository, NeloCheckoutGateway,
    PaymentAppState, RecordingCompletionCallback,
};
use nelo_checkout::domain::foundation::TransactionReference;
use nelo_checkout::domain::payment::{
    AcquirerConfig, AcquirerEnvironment, PaymentTransaction, TransactionState,
    CHARGE_REJECTED_MESSAGE,
};
use nelo_checkout::ports::TransactionRepository;

/// `{"order_id":"ORD-1001"}` between two dummy segments.
const ORD_1001_TOKEN: &str = "h.eyJvcmRlcl9pZCI6Ik9SRC0xMDAxIn0.s";
const MERCHANT_SECRET: &str = "sk_live_do_not_leak";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    server: MockServer,
    router: Router,
    repo: InMemoryTransactionRepository,
    callback: RecordingCompletionCallback,
    transaction: PaymentTransaction,
}

async fn spawn_app() -> TestApp {
    let server = MockServer::start().await;

    let repo = InMemoryTransactionRepository::new();
    let transaction = PaymentTransaction::new(
        TransactionReference::new("ORD-1001").unwrap(),
        25_000,
        "MXN",
    );
    repo.save(&transaction).await.unwrap();

    let acquirer = AcquirerConfig::new("nelo", MERCHANT_SECRET, AcquirerEnvironment::Sandbox)
        .with_rest_url(format!("{}/v1", server.uri()));
    let callback = RecordingCompletionCallback::new();

    let state = PaymentAppState {
        acquirer_store: Arc::new(InMemoryAcquirerStore::with_acquirer(acquirer).await),
        checkout_gateway: Arc::new(
            NeloCheckoutGateway::with_timeout(Duration::from_secs(5)).unwrap(),
        ),
        transaction_repository: Arc::new(repo.clone()),
        completion_callback: Arc::new(callback.clone()),
        public_base_url: "https://shop.example.com".into(),
        processing_path: "/payment/process".into(),
    };

    TestApp {
        server,
        router: app_router(state, Duration::from_secs(10)),
        repo,
        callback,
        transaction,
    }
}

async fn mount_charge(server: &MockServer, endpoint: &str, status: u16, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/v1/charge/{}", endpoint)))
        .and(header_matcher(
            "authorization",
            format!("Bearer {}", MERCHANT_SECRET).as_str(),
        ))
        .and(body_json(json!({ "checkoutToken": ORD_1001_TOKEN })))
        .respond_with(ResponseTemplate::new(status).set_body_string("provider says no"))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn confirm_request() -> Request<Body> {
    Request::builder()
        .uri(format!("/payment/nelo/confirm?checkoutToken={}", ORD_1001_TOKEN))
        .body(Body::empty())
        .unwrap()
}

fn checkout_request() -> Request<Body> {
    let body = json!({
        "reference": "ORD-1001",
        "amount_minor": 25000,
        "currency": "MXN",
        "buyer": {
            "first_name": "Ana",
            "last_name": "García",
            "email": "ana@example.com",
            "phone": "5512345678",
            "address": {
                "street": "Av. Reforma 1",
                "city": "CDMX",
                "state": "CMX",
                "postal_code": "06600"
            }
        }
    });

    Request::builder()
        .method("POST")
        .uri("/payment/nelo/checkout")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_processing_redirect(response: &axum::response::Response) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/payment/process"
    );
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn order_1001_goes_from_checkout_to_done() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/v1/checkout"))
        .and(body_json(json!({
            "order": { "id": "ORD-1001", "totalAmount": { "amount": 25000, "currencyCode": "MXN" } },
            "customer": {
                "phoneNumber": { "number": "5512345678", "countryIso2": "MX" },
                "firstName": "Ana",
                "maternalLastName": "",
                "paternalLastName": "García",
                "email": "ana@example.com",
                "address": {
                    "addressMX": {
                        "buildingNumber": "",
                        "street": "Av. Reforma 1",
                        "interiorNumber": "",
                        "city": "CDMX",
                        "delegation": "",
                        "state": "CMX",
                        "colony": "",
                        "postalCode": "06600"
                    },
                    "countryIso2": "MX"
                }
            },
            "redirectConfirmUrl": "https://shop.example.com/payment/nelo/confirm",
            "redirectCancelUrl": "https://shop.example.com/payment/nelo/cancel"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "redirectUrl": "https://checkout.nelo.co/s/ORD-1001" })),
        )
        .expect(1)
        .mount(&app.server)
        .await;
    mount_charge(&app.server, "auth", 200, 1).await;
    mount_charge(&app.server, "capture", 200, 1).await;

    let response = app.router.clone().oneshot(checkout_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["redirectUrl"], "https://checkout.nelo.co/s/ORD-1001");

    let response = app.router.clone().oneshot(confirm_request()).await.unwrap();
    assert_processing_redirect(&response);

    let stored = app.repo.get(app.transaction.id).await.unwrap();
    assert_eq!(stored.state, TransactionState::Done);
    assert_eq!(stored.acquirer_reference.as_deref(), Some("ORD-1001"));
    assert!(stored.authorized_at.is_some());
    assert!(stored.captured_at.is_some());
    assert_eq!(app.callback.count().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_confirm_deliveries_complete_order_once() {
    let app = spawn_app().await;
    for endpoint in ["auth", "capture"] {
        Mock::given(method("POST"))
            .and(path(format!("/v1/charge/{}", endpoint)))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(50)))
            .mount(&app.server)
            .await;
    }

    let deliveries: Vec<_> = (0..2)
        .map(|_| {
            let router = app.router.clone();
            tokio::spawn(async move { router.oneshot(confirm_request()).await.unwrap() })
        })
        .collect();

    for delivery in futures::future::join_all(deliveries).await {
        assert_processing_redirect(&delivery.unwrap());
    }

    assert!(app.repo.get(app.transaction.id).await.unwrap().is_done());
    assert_eq!(app.callback.count().await, 1);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn capture_failure_leaves_order_in_error_with_authorization_recorded() {
    let app = spawn_app().await;
    mount_charge(&app.server, "auth", 200, 1).await;
    mount_charge(&app.server, "capture", 500, 1).await;

    let response = app.router.clone().oneshot(confirm_request()).await.unwrap();
    assert_processing_redirect(&response);

    let stored = app.repo.get(app.transaction.id).await.unwrap();
    assert_eq!(stored.state, TransactionState::Error);
    assert_eq!(stored.state_message.as_deref(), Some(CHARGE_REJECTED_MESSAGE));
    assert!(stored.authorized_at.is_some());
    assert!(stored.captured_at.is_none());
    assert_eq!(app.callback.count().await, 0);
}

#[tokio::test]
async fn auth_failure_never_reaches_capture() {
    let app = spawn_app().await;
    mount_charge(&app.server, "auth", 401, 1).await;
    mount_charge(&app.server, "capture", 200, 0).await;

    let response = app.router.clone().oneshot(confirm_request()).await.unwrap();
    assert_processing_redirect(&response);

    let stored = app.repo.get(app.transaction.id).await.unwrap();
    assert_eq!(stored.state, TransactionState::Error);
    assert!(!stored
        .state_message
        .unwrap_or_default()
        .contains("provider says no"));
}

#[tokio::test]
async fn rejected_checkout_returns_generic_error_without_secret_or_body() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout"))
        .respond_with(
            ResponseTemplate::new(402)
                .set_body_json(json!({ "error": "insufficient merchant balance" })),
        )
        .mount(&app.server)
        .await;

    let response = app.router.clone().oneshot(checkout_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_text(response).await;
    assert!(body.contains("Please contact support."));
    assert!(!body.contains(MERCHANT_SECRET));
    assert!(!body.contains("insufficient merchant balance"));
}

#[tokio::test]
async fn malformed_token_is_redirected_without_remote_calls() {
    let app = spawn_app().await;
    mount_charge(&app.server, "auth", 200, 0).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payment/nelo/confirm")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("checkoutToken=not-a-token"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_processing_redirect(&response);
    assert_eq!(
        app.repo.get(app.transaction.id).await.unwrap().state,
        TransactionState::Pending
    );
}
