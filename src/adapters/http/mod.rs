//! HTTP adapters - REST API implementations.

pub mod payment;

use std::time::Duration;

use axum::http::HeaderName;
use axum::{routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use payment::{payment_router, PaymentAppState};

use payment::{checkout_routes, redirect_routes};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Full application router: payment endpoints, the processing page and the
/// tracing and request-id layers.
///
/// `request_timeout` bounds the checkout endpoints and the processing page
/// only. Confirm and cancel run unbounded so a slow provider still ends in
/// the processing redirect.
pub fn app_router(state: PaymentAppState, request_timeout: Duration) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let processing_path = state.processing_path.clone();

    let bounded = Router::new()
        .nest("/payment", checkout_routes())
        .route(&processing_path, get(processing_page))
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .nest("/payment", redirect_routes())
        .merge(bounded)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Landing page after a provider redirect. Order status is shown elsewhere.
async fn processing_page() -> &'static str {
    "Your payment is being processed."
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use axum::http::header;
    use serde_json::json;

    use crate::adapters::callbacks::{LoggingCompletionCallback, RecordingCompletionCallback};
    use crate::adapters::memory::{InMemoryAcquirerStore, InMemoryTransactionRepository};
    use crate::adapters::nelo::MockCheckoutGateway;
    use crate::domain::foundation::{TransactionId, TransactionReference};
    use crate::domain::payment::{
        AcquirerConfig, AcquirerEnvironment, PaymentTransaction, TransactionState,
    };
    use crate::ports::TransactionRepository;

    /// `{"order_id":"ORD-1001"}` between two dummy segments.
    const ORD_1001_TOKEN: &str = "h.eyJvcmRlcl9pZCI6Ik9SRC0xMDAxIn0.s";

    fn state() -> PaymentAppState {
        PaymentAppState {
            acquirer_store: Arc::new(InMemoryAcquirerStore::new()),
            checkout_gateway: Arc::new(MockCheckoutGateway::new()),
            transaction_repository: Arc::new(InMemoryTransactionRepository::new()),
            completion_callback: Arc::new(LoggingCompletionCallback::new()),
            public_base_url: "http://localhost:8080".into(),
            processing_path: "/payment/process".into(),
        }
    }

    struct SlowProvider {
        state: PaymentAppState,
        repo: InMemoryTransactionRepository,
        callback: RecordingCompletionCallback,
        transaction_id: TransactionId,
    }

    /// Every gateway call takes `latency`.
    async fn slow_provider(latency: Duration) -> SlowProvider {
        let repo = InMemoryTransactionRepository::new();
        let transaction =
            PaymentTransaction::new(TransactionReference::new("ORD-1001").unwrap(), 25_000, "MXN");
        repo.save(&transaction).await.unwrap();

        let gateway = MockCheckoutGateway::new();
        gateway.set_latency(latency);
        let callback = RecordingCompletionCallback::new();
        let store = InMemoryAcquirerStore::with_acquirer(AcquirerConfig::new(
            "nelo",
            "sk_test_secret",
            AcquirerEnvironment::Sandbox,
        ))
        .await;

        SlowProvider {
            state: PaymentAppState {
                acquirer_store: Arc::new(store),
                checkout_gateway: Arc::new(gateway),
                transaction_repository: Arc::new(repo.clone()),
                completion_callback: Arc::new(callback.clone()),
                public_base_url: "https://shop.example.com".into(),
                processing_path: "/payment/process".into(),
            },
            repo,
            callback,
            transaction_id: transaction.id,
        }
    }

    fn confirm_request() -> Request<Body> {
        Request::builder()
            .uri(format!("/payment/nelo/confirm?checkoutToken={}", ORD_1001_TOKEN))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn confirm_slower_than_request_timeout_still_redirects_and_finalizes() {
        let slow = slow_provider(Duration::from_millis(150)).await;

        let response = app_router(slow.state.clone(), Duration::from_millis(100))
            .oneshot(confirm_request())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/payment/process"
        );
        let stored = slow.repo.get(slow.transaction_id).await.unwrap();
        assert_eq!(stored.state, TransactionState::Done);
        assert!(stored.authorized_at.is_some());
        assert!(stored.captured_at.is_some());
        assert_eq!(slow.callback.count().await, 1);
    }

    #[tokio::test]
    async fn confirm_charge_completes_after_caller_disconnects() {
        let slow = slow_provider(Duration::from_millis(100)).await;
        let router = app_router(slow.state.clone(), Duration::from_secs(5));

        // Drop the in-flight request mid-charge
        let abandoned =
            tokio::time::timeout(Duration::from_millis(50), router.oneshot(confirm_request())).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(500)).await;

        let stored = slow.repo.get(slow.transaction_id).await.unwrap();
        assert_eq!(stored.state, TransactionState::Done);
        assert_eq!(slow.callback.count().await, 1);
    }

    #[tokio::test]
    async fn checkout_endpoint_stays_bounded_by_request_timeout() {
        let slow = slow_provider(Duration::from_millis(300)).await;

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

        let response = app_router(slow.state, Duration::from_millis(100))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/payment/nelo/checkout")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn processing_page_is_served() {
        let response = app_router(state(), Duration::from_secs(5))
            .oneshot(
                Request::builder()
                    .uri("/payment/process")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn cancel_route_is_mounted() {
        let response = app_router(state(), Duration::from_secs(5))
            .oneshot(
                Request::builder()
                    .uri("/payment/nelo/cancel")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}
