//! HTTP DTOs (Data Transfer Objects) for payment endpoints.
//!
//! These types define the request/response structure for the payment API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::TransactionReference;
use crate::domain::payment::{Buyer, CheckoutOrder, PaymentError};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Fields the provider sends on the confirm redirect (query string or form).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmParams {
    #[serde(rename = "checkoutToken", default)]
    pub checkout_token: Option<String>,
}

impl ConfirmParams {
    /// The token exactly as the provider sent it; blank values count as absent.
    pub fn token(&self) -> Option<&str> {
        self.checkout_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

/// Request to open a checkout session for an order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Order reference the transaction was created with.
    pub reference: String,
    /// Amount in minor currency units.
    pub amount_minor: i64,
    pub currency: String,
    pub buyer: Buyer,
}

impl CreateCheckoutRequest {
    pub fn into_order(self) -> Result<CheckoutOrder, PaymentError> {
        Ok(CheckoutOrder {
            reference: TransactionReference::new(self.reference)?,
            amount_minor: self.amount_minor,
            currency: self.currency.to_uppercase(),
            buyer: self.buyer,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Where to send the buyer to complete checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRedirectResponse {
    pub redirect_url: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response DTO
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_token_is_absent() {
        let params = ConfirmParams {
            checkout_token: Some("  ".into()),
        };
        assert_eq!(params.token(), None);
        assert_eq!(ConfirmParams::default().token(), None);
    }

    #[test]
    fn token_is_read_from_camel_case_field() {
        let params: ConfirmParams =
            serde_json::from_value(json!({ "checkoutToken": "a.b.c" })).unwrap();
        assert_eq!(params.token(), Some("a.b.c"));
    }

    #[test]
    fn token_is_passed_through_untrimmed() {
        let params = ConfirmParams {
            checkout_token: Some(" a.b.c\n".into()),
        };
        assert_eq!(params.token(), Some(" a.b.c\n"));
    }

    #[test]
    fn checkout_request_becomes_order() {
        let request: CreateCheckoutRequest = serde_json::from_value(json!({
            "reference": "ORD-1001",
            "amount_minor": 25000,
            "currency": "mxn",
            "buyer": {
                "first_name": "Ana",
                "last_name": "García",
                "email": "ana@example.com",
                "phone": "5512345678",
                "address": {
                    "street": "Av. Reforma 1",
                    "city": "CDMX",
                    "state": null,
                    "postal_code": "06600"
                }
            }
        }))
        .unwrap();

        let order = request.into_order().unwrap();
        assert_eq!(order.reference.as_str(), "ORD-1001");
        assert_eq!(order.currency, "MXN");
        assert_eq!(order.buyer.address.country_iso2, "MX");
    }

    #[test]
    fn blank_reference_is_rejected() {
        let request = CreateCheckoutRequest {
            reference: " ".into(),
            amount_minor: 1,
            currency: "MXN".into(),
            buyer: serde_json::from_value(json!({
                "first_name": "A", "last_name": "B", "email": "a@b.c", "phone": "1",
                "address": { "street": "s", "city": "c", "state": null, "postal_code": "1" }
            }))
            .unwrap(),
        };
        assert!(matches!(
            request.into_order(),
            Err(PaymentError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn redirect_response_uses_camel_case() {
        let body = serde_json::to_value(CheckoutRedirectResponse {
            redirect_url: Some("https://x".into()),
        })
        .unwrap();
        assert_eq!(body, json!({ "redirectUrl": "https://x" }));
    }
}
