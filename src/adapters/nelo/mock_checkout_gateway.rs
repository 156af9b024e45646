//! Mock checkout gateway for testing.
//!
//! Provides a configurable `CheckoutGateway` for unit and integration tests.
//! Supports:
//! - Pre-configured checkout sessions
//! - Fault injection per method
//! - Call tracking
//! - Artificial latency (to widen race windows in concurrency tests)

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::payment::{AcquirerConfig, CallbackUrls, CheckoutOrder, CheckoutSession};
use crate::ports::{ChargeRequest, CheckoutGateway, GatewayFault};

/// Method names used for fault injection and call tracking.
pub const CREATE_CHECKOUT: &str = "create_checkout";
pub const AUTHORIZE: &str = "authorize";
pub const CAPTURE: &str = "capture";

/// Mock checkout gateway.
///
/// # Example
///
/// ```ignore
/// let gateway = MockCheckoutGateway::new();
/// gateway.set_method_fault(CAPTURE, GatewayFault::http_status(500, "boom"));
///
/// // ... run the charge ...
/// assert_eq!(gateway.call_count(AUTHORIZE), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockCheckoutGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_session: Option<CheckoutSession>,
    method_faults: HashMap<String, GatewayFault>,
    call_log: Vec<MethodCall>,
    latency: Option<Duration>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockCheckoutGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose every call to `method` fails with `fault`.
    pub fn failing(method: &str, fault: GatewayFault) -> Self {
        let mock = Self::new();
        mock.set_method_fault(method, fault);
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the session returned by the next `create_checkout`.
    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.inner.lock().unwrap().next_session = Some(session);
    }

    pub fn set_method_fault(&self, method: &str, fault: GatewayFault) {
        self.inner
            .lock()
            .unwrap()
            .method_faults
            .insert(method.to_string(), fault);
    }

    pub fn clear_faults(&self) {
        self.inner.lock().unwrap().method_faults.clear();
    }

    /// Delay every call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.inner.lock().unwrap().latency = Some(latency);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    async fn enter(&self, method: &str, args: Vec<String>) -> Result<(), GatewayFault> {
        let latency = {
            let mut state = self.inner.lock().unwrap();
            state.call_log.push(MethodCall {
                method: method.to_string(),
                args,
            });
            state.latency
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match self.inner.lock().unwrap().method_faults.get(method) {
            Some(fault) => Err(fault.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CheckoutGateway for MockCheckoutGateway {
    async fn create_checkout(
        &self,
        acquirer: &AcquirerConfig,
        order: &CheckoutOrder,
        _callbacks: &CallbackUrls,
    ) -> Result<CheckoutSession, GatewayFault> {
        self.enter(
            CREATE_CHECKOUT,
            vec![acquirer.provider().to_string(), order.reference.to_string()],
        )
        .await?;

        let session = self.inner.lock().unwrap().next_session.take();
        Ok(session.unwrap_or_else(|| CheckoutSession {
            redirect_url: format!("https://checkout.mock/{}", order.reference),
        }))
    }

    async fn authorize(
        &self,
        acquirer: &AcquirerConfig,
        request: &ChargeRequest,
    ) -> Result<(), GatewayFault> {
        self.enter(
            AUTHORIZE,
            vec![acquirer.provider().to_string(), request.checkout_token.clone()],
        )
        .await
    }

    async fn capture(
        &self,
        acquirer: &AcquirerConfig,
        request: &ChargeRequest,
    ) -> Result<(), GatewayFault> {
        self.enter(
            CAPTURE,
            vec![acquirer.provider().to_string(), request.checkout_token.clone()],
        )
        .await
    }
}
