//! HTTP handlers for payment endpoints.
//!
//! The confirm and cancel endpoints are hit by the buyer's browser on the
//! provider's redirect. They carry no session or anti-forgery token and
//! always answer with a redirect to the processing page; outcomes are only
//! visible through the transaction state.

use std::sync::Arc;

use axum::extract::{Form, Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};

use crate::application::handlers::payment::{
    ConfirmChargeCommand, ConfirmChargeHandler, ConfirmChargeOutcome,
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler, GetCheckoutRedirectHandler,
    GetCheckoutRedirectQuery, TransactionStateHandler,
};
use crate::domain::payment::PaymentError;
use crate::ports::{AcquirerConfigStore, CheckoutGateway, CompletionCallback, TransactionRepository};

use super::dto::{CheckoutRedirectResponse, ConfirmParams, CreateCheckoutRequest, ErrorResponse};

/// Where the buyer lands when nothing else is configured.
pub const DEFAULT_PROCESSING_PATH: &str = "/payment/process";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct PaymentAppState {
    pub acquirer_store: Arc<dyn AcquirerConfigStore>,
    pub checkout_gateway: Arc<dyn CheckoutGateway>,
    pub transaction_repository: Arc<dyn TransactionRepository>,
    pub completion_callback: Arc<dyn CompletionCallback>,
    /// Base URL the provider redirects buyers back to.
    pub public_base_url: String,
    /// Redirect target of the confirm and cancel endpoints.
    pub processing_path: String,
}

impl PaymentAppState {
    pub fn transaction_state_handler(&self) -> TransactionStateHandler {
        TransactionStateHandler::new(
            self.transaction_repository.clone(),
            self.completion_callback.clone(),
        )
    }

    pub fn confirm_charge_handler(&self) -> ConfirmChargeHandler {
        ConfirmChargeHandler::new(
            self.acquirer_store.clone(),
            self.checkout_gateway.clone(),
            Arc::new(self.transaction_state_handler()),
        )
    }

    pub fn create_checkout_session_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(
            self.acquirer_store.clone(),
            self.checkout_gateway.clone(),
            self.public_base_url.clone(),
        )
    }

    pub fn checkout_redirect_handler(&self) -> GetCheckoutRedirectHandler {
        GetCheckoutRedirectHandler::new(self.acquirer_store.clone())
    }

    fn processing_redirect(&self) -> Redirect {
        Redirect::to(&self.processing_path)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Provider Redirect Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET|POST /payment/:provider/confirm
///
/// Reads `checkoutToken` from the form body or the query string. Any
/// rejection (bad content type, undecodable form) counts as no token. The
/// charge runs on its own task and completes even if the caller goes away.
pub async fn confirm(
    State(state): State<PaymentAppState>,
    Path(provider): Path<String>,
    query: Option<Query<ConfirmParams>>,
    form: Option<Form<ConfirmParams>>,
) -> Redirect {
    let token = form
        .as_ref()
        .and_then(|Form(params)| params.token())
        .or_else(|| query.as_ref().and_then(|Query(params)| params.token()))
        .map(str::to_string);

    let Some(checkout_token) = token else {
        tracing::info!(provider = %provider, "Confirm redirect without checkout token");
        return state.processing_redirect();
    };

    let cmd = ConfirmChargeCommand {
        provider: provider.clone(),
        checkout_token,
    };

    // Detached from the request future: a client disconnect must not stop the
    // charge between auth, capture and the state write.
    let handler = state.confirm_charge_handler();
    let charge = tokio::spawn(async move { handler.handle(cmd).await });

    let result = match charge.await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(provider = %provider, error = %e, "Confirm charge task failed");
            return state.processing_redirect();
        }
    };

    match result {
        Ok(ConfirmChargeOutcome::Finalized { reference }) => {
            tracing::info!(provider = %provider, reference = %reference, "Payment confirmed");
        }
        Ok(ConfirmChargeOutcome::AlreadyDone { reference }) => {
            tracing::info!(provider = %provider, reference = %reference, "Duplicate confirm delivery");
        }
        Ok(ConfirmChargeOutcome::ChargeFailed { reference, fault }) => {
            tracing::warn!(
                provider = %provider,
                reference = %reference,
                phase = %fault.phase,
                "Payment charge failed"
            );
        }
        Ok(ConfirmChargeOutcome::NotApplicable { reason }) => {
            tracing::info!(provider = %provider, reason = ?reason, "Confirm redirect not applicable");
        }
        Err(e) => {
            tracing::warn!(provider = %provider, error = %e, "Confirm redirect could not be processed");
        }
    }

    state.processing_redirect()
}

/// GET|POST /payment/:provider/cancel
pub async fn cancel(State(state): State<PaymentAppState>, Path(provider): Path<String>) -> Redirect {
    tracing::info!(provider = %provider, "Buyer cancelled checkout");
    state.processing_redirect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /payment/:provider/checkout
pub async fn create_checkout(
    State(state): State<PaymentAppState>,
    Path(provider): Path<String>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let cmd = CreateCheckoutSessionCommand {
        provider,
        order: request.into_order()?,
    };

    let session = state.create_checkout_session_handler().handle(cmd).await?;

    Ok(Json(CheckoutRedirectResponse {
        redirect_url: Some(session.redirect_url),
    }))
}

/// GET /payment/:provider/checkout
///
/// Returns the redirect URL of the last session created for the provider.
pub async fn get_checkout_redirect(
    State(state): State<PaymentAppState>,
    Path(provider): Path<String>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let redirect_url = state
        .checkout_redirect_handler()
        .handle(GetCheckoutRedirectQuery { provider })
        .await?;

    Ok(Json(CheckoutRedirectResponse { redirect_url }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts payment errors to HTTP responses.
#[derive(Debug)]
pub struct PaymentApiError(PaymentError);

impl From<PaymentError> for PaymentApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            PaymentError::ReferenceNotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::AmbiguousReference { .. } => StatusCode::CONFLICT,
            PaymentError::AcquirerNotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            PaymentError::ProvisioningFailed => StatusCode::BAD_GATEWAY,
            PaymentError::ConcurrentModification { .. } => StatusCode::CONFLICT,
            PaymentError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            PaymentError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Payment request failed");
        }

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.public_message());
        (status, Json(body)).into_response()
    }
}
